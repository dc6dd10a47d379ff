//! Yahoo Finance API client

use crate::error::{Result, StockError};
use crate::series::{DateRange, PriceBar, PriceSeries, Symbol};
use crate::source::MarketDataSource;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "yahoo";

/// Yahoo Finance daily-bar client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get daily bars for `symbol` between the range bounds
    ///
    /// Both bounds are taken at midnight UTC, so the bar dated `range.end`
    /// itself is not part of the window. Bars are dated in the exchange's
    /// local time.
    #[instrument(skip(self), fields(symbol = %symbol, range = %range))]
    pub async fn get_historical_bars(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceSeries> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let start = to_offset_datetime(range.start)?;
        let end = to_offset_datetime(range.end)?;

        let response = provider
            .get_quote_history(symbol.as_str(), start, end)
            .await
            .map_err(|e| classify_error(symbol, &e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| classify_error(symbol, &e.to_string()))?;

        let gmtoffset = response
            .metadata()
            .map_err(|e| classify_error(symbol, &e.to_string()))?
            .gmtoffset;

        let bars = quotes
            .iter()
            .map(|q| {
                let date = bar_date(q.timestamp as i64, gmtoffset).ok_or_else(|| {
                    StockError::YahooFinanceError(format!(
                        "Invalid timestamp {} for {symbol}",
                        q.timestamp
                    ))
                })?;
                Ok(PriceBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    adj_close: q.adjclose,
                    volume: q.volume,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if bars.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("no trading data between {} and {}", range.start, range.end),
            });
        }

        debug!(bars = bars.len(), "Fetched historical bars");
        Ok(PriceSeries::new(symbol.clone(), bars))
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn fetch(&self, symbol: &Symbol, range: &DateRange) -> Result<PriceSeries> {
        self.get_historical_bars(symbol, range).await
    }
}

/// Calendar date of a bar stamped at `timestamp`, on an exchange
/// `gmtoffset` seconds east of UTC
fn bar_date(timestamp: i64, gmtoffset: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + i64::from(gmtoffset), 0).map(|dt| dt.date_naive())
}

fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| StockError::YahooFinanceError(format!("Invalid date {date}: {e}")))
}

/// Map a Yahoo error message onto the fetch error taxonomy
fn classify_error(symbol: &Symbol, message: &str) -> StockError {
    let lower = message.to_lowercase();

    if lower.contains("too many requests") || lower.contains("429") {
        warn!(%symbol, "Rate limited by Yahoo Finance");
        StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        }
    } else if lower.contains("empty")
        || lower.contains("no quotes")
        || lower.contains("no result")
        || lower.contains("not found")
    {
        StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: message.to_string(),
        }
    } else {
        StockError::YahooFinanceError(message.to_string())
    }
}
