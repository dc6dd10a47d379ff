//! Session-scoped caching of fetched series

use crate::error::Result;
use crate::series::{DateRange, PriceSeries, Symbol};
use crate::source::MarketDataSource;
use async_trait::async_trait;
use cached::{Cached, TimedCache};
use std::time::Duration;
use tokio::sync::Mutex;

type CacheKey = (Symbol, DateRange);

/// Wraps a [`MarketDataSource`] and reuses successful fetches for identical
/// `(symbol, range)` inputs until `ttl` elapses
///
/// Failures are never cached. Only fetches go through here: summaries must be
/// requested fresh every time.
pub struct CachedSource<S> {
    inner: S,
    cache: Mutex<TimedCache<CacheKey, PriceSeries>>,
}

impl<S: MarketDataSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(TimedCache::with_lifespan(ttl)),
        }
    }

    /// Number of cached series
    pub async fn len(&self) -> usize {
        self.cache.lock().await.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every cached series
    pub async fn clear(&self) {
        self.cache.lock().await.cache_clear();
    }
}

#[async_trait]
impl<S: MarketDataSource> MarketDataSource for CachedSource<S> {
    async fn fetch(&self, symbol: &Symbol, range: &DateRange) -> Result<PriceSeries> {
        let key = (symbol.clone(), *range);

        if let Some(series) = self.cache.lock().await.cache_get(&key) {
            tracing::debug!(%symbol, %range, "Cache hit");
            return Ok(series.clone());
        }

        tracing::debug!(%symbol, %range, "Cache miss");
        let series = self.inner.fetch(symbol, range).await?;
        self.cache.lock().await.cache_set(key, series.clone());
        Ok(series)
    }
}
