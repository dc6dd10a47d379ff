//! Error types for comparison operations

use chrono::NaiveDate;
use compare_llm::LLMError;
use thiserror::Error;

/// Errors surfaced by the fetch, summary and session layers
#[derive(Debug, Error)]
pub enum StockError {
    /// Symbol text is not a usable token
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Start date falls after end date
    #[error("Invalid date range: end date {end} must fall after start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Source returned nothing for the requested symbol and range
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Rate limit exceeded for the data source
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Text-generation service failed
    #[error("Summarization failed: {0}")]
    Summarization(#[from] LLMError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unparseable front-end command
    #[error("Command error: {0}")]
    CommandError(String),

    /// Action not available in the current view
    #[error("{0}")]
    InvalidState(String),
}

impl StockError {
    /// Whether this error came from retrieving market data
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            StockError::InvalidSymbol(_)
                | StockError::DataUnavailable { .. }
                | StockError::RateLimitExceeded { .. }
                | StockError::YahooFinanceError(_)
        )
    }
}

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, StockError>;
