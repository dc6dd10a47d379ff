//! Date-aligned comparison of two closing-price series

use crate::series::{PriceSeries, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One date of the combined table; `None` where that side has no bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub first: Option<f64>,
    pub second: Option<f64>,
}

/// Which column of a [`CombinedSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// Outer join of two closing-price columns on date
///
/// Column headers are the two symbols. Rows are ascending by date and cover
/// the union of both inputs' dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSeries {
    symbols: (Symbol, Symbol),
    rows: Vec<CombinedRow>,
}

impl CombinedSeries {
    pub fn symbols(&self) -> (&Symbol, &Symbol) {
        (&self.symbols.0, &self.symbols.1)
    }

    pub fn symbol(&self, side: Side) -> &Symbol {
        match side {
            Side::First => &self.symbols.0,
            Side::Second => &self.symbols.1,
        }
    }

    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// Values of one column, aligned with [`CombinedSeries::dates`]
    pub fn column(&self, side: Side) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| match side {
                Side::First => r.first,
                Side::Second => r.second,
            })
            .collect()
    }

    /// Column headed by `symbol`; the first column wins if both match
    pub fn column_for(&self, symbol: &Symbol) -> Option<Vec<Option<f64>>> {
        if &self.symbols.0 == symbol {
            Some(self.column(Side::First))
        } else if &self.symbols.1 == symbol {
            Some(self.column(Side::Second))
        } else {
            None
        }
    }
}

/// Rename each series' close column to its symbol and outer-join on date
///
/// No interpolation or forward-fill: a date missing from one side stays empty
/// in that side's column.
pub fn align(
    first: &PriceSeries,
    first_symbol: &Symbol,
    second: &PriceSeries,
    second_symbol: &Symbol,
) -> CombinedSeries {
    let mut joined: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for (date, close) in first.closes() {
        joined.entry(date).or_default().0 = Some(close);
    }
    for (date, close) in second.closes() {
        joined.entry(date).or_default().1 = Some(close);
    }

    let rows = joined
        .into_iter()
        .map(|(date, (first, second))| CombinedRow {
            date,
            first,
            second,
        })
        .collect();

    CombinedSeries {
        symbols: (first_symbol.clone(), second_symbol.clone()),
        rows,
    }
}
