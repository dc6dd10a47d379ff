//! Symbols, date ranges and per-symbol price series

use crate::error::{Result, StockError};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

/// Ticker identifier, always stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Parse user input into a symbol
    ///
    /// Surrounding whitespace is dropped and the text uppercased. Empty input
    /// and input with interior whitespace are rejected; whether the ticker
    /// actually exists is left to the data source.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(StockError::InvalidSymbol(input.to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The symbol text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Calendar date range `(start, end)`
///
/// Construction does not check ordering; call [`DateRange::validate`] before
/// handing the range to a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering the `days` days up to and including `today`
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self::new(today - Duration::days(days), today)
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Reject ranges whose start falls after their end
    pub fn validate(&self) -> Result<()> {
        if self.is_ordered() {
            Ok(())
        } else {
            Err(StockError::InvalidRange {
                start: self.start,
                end: self.end,
            })
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// One daily bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Date-indexed daily bars for one symbol
///
/// Bars are kept sorted by date with at most one bar per date. Days without
/// data are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting bars by date; a later bar for the same date
    /// replaces an earlier one
    pub fn new(symbol: Symbol, mut bars: Vec<PriceBar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { symbol, bars }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Dates present in the series, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    /// `(date, close)` pairs, ascending by date
    pub fn closes(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.bars.iter().map(|b| (b.date, b.close))
    }

    /// Closing price on `date`, if the series has a bar for it
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.bars
            .binary_search_by_key(&date, |b| b.date)
            .ok()
            .map(|i| self.bars[i].close)
    }

    /// Column-oriented dump of every field: `{field: {date: value}}`
    pub fn to_columns(&self) -> Value {
        let mut open = Map::new();
        let mut high = Map::new();
        let mut low = Map::new();
        let mut close = Map::new();
        let mut adj_close = Map::new();
        let mut volume = Map::new();

        for bar in &self.bars {
            let key = bar.date.to_string();
            open.insert(key.clone(), json!(bar.open));
            high.insert(key.clone(), json!(bar.high));
            low.insert(key.clone(), json!(bar.low));
            close.insert(key.clone(), json!(bar.close));
            adj_close.insert(key.clone(), json!(bar.adj_close));
            volume.insert(key, json!(bar.volume));
        }

        json!({
            "Open": open,
            "High": high,
            "Low": low,
            "Close": close,
            "Adj Close": adj_close,
            "Volume": volume,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    pub fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: date(day),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            adj_close: close,
            volume: 1_000,
        }
    }

    /// Series with one bar per `(day, close)` pair in January 2024
    pub fn series(symbol: &str, points: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            Symbol::parse(symbol).unwrap(),
            points.iter().map(|&(d, c)| bar(d, c)).collect(),
        )
    }
}
