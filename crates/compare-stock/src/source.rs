//! Market data source seam

use crate::error::Result;
use crate::series::{DateRange, PriceSeries, Symbol};
use async_trait::async_trait;

/// Retrieves daily bars for one symbol over a date range
///
/// Implementations do not check range ordering and do not cache; both are
/// the caller's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(&self, symbol: &Symbol, range: &DateRange) -> Result<PriceSeries>;
}

#[async_trait]
impl<S: MarketDataSource + ?Sized> MarketDataSource for Box<S> {
    async fn fetch(&self, symbol: &Symbol, range: &DateRange) -> Result<PriceSeries> {
        (**self).fetch(symbol, range).await
    }
}
