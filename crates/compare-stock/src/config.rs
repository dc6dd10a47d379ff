//! Configuration for comparison sessions

use crate::chart::ChartKind;
use crate::error::{Result, StockError};
use compare_llm::providers::openai::API_KEY_ENV;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for comparison sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Model used for comparative summaries
    pub model: String,

    /// Upper bound on summary length; provider default when unset
    pub max_summary_tokens: Option<usize>,

    /// Timeout for each summary request
    pub request_timeout: Duration,

    /// Reuse fetched series for identical inputs within the session;
    /// disabled when unset so every submit re-fetches
    pub fetch_cache_ttl: Option<Duration>,

    /// Symbols pre-filled when a session starts
    pub default_symbols: (String, String),

    /// Days between the pre-filled start date and today
    pub default_lookback_days: i64,

    /// Chart kind pre-selected when a session starts
    pub default_chart: ChartKind,

    /// Secret for the text-generation service
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_summary_tokens: None,
            request_timeout: Duration::from_secs(120),
            fetch_cache_ttl: None,
            default_symbols: ("AAPL".to_string(), "GOOGL".to_string()),
            default_lookback_days: 7,
            default_chart: ChartKind::Line,
            openai_api_key: None,
        }
    }
}

impl CompareConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }

        if self.default_lookback_days < 0 {
            return Err(StockError::ConfigError(
                "default_lookback_days must not be negative".to_string(),
            ));
        }

        // the HTTP client takes whole seconds
        if self.request_timeout < Duration::from_secs(1) {
            return Err(StockError::ConfigError(
                "request_timeout must be at least 1 second".to_string(),
            ));
        }

        if self.fetch_cache_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(StockError::ConfigError(
                "fetch_cache_ttl must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether summaries can be requested at all
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

/// Builder for CompareConfig
#[derive(Debug, Default)]
pub struct CompareConfigBuilder {
    model: Option<String>,
    max_summary_tokens: Option<usize>,
    request_timeout: Option<Duration>,
    fetch_cache_ttl: Option<Duration>,
    default_symbols: Option<(String, String)>,
    default_lookback_days: Option<i64>,
    default_chart: Option<ChartKind>,
    openai_api_key: Option<String>,
}

impl CompareConfigBuilder {
    /// Set the summary model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the summary token limit
    pub fn max_summary_tokens(mut self, tokens: usize) -> Self {
        self.max_summary_tokens = Some(tokens);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Enable the session fetch cache
    pub fn fetch_cache_ttl(mut self, ttl: Duration) -> Self {
        self.fetch_cache_ttl = Some(ttl);
        self
    }

    /// Set the pre-filled symbols
    pub fn default_symbols(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.default_symbols = Some((first.into(), second.into()));
        self
    }

    /// Set the pre-filled lookback
    pub fn default_lookback_days(mut self, days: i64) -> Self {
        self.default_lookback_days = Some(days);
        self
    }

    /// Set the pre-selected chart kind
    pub fn default_chart(mut self, kind: ChartKind) -> Self {
        self.default_chart = Some(kind);
        self
    }

    /// Set the API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Load the API key from `OPENAI_API_KEY` if present
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.openai_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CompareConfig> {
        let defaults = CompareConfig::default();

        let config = CompareConfig {
            model: self.model.unwrap_or(defaults.model),
            max_summary_tokens: self.max_summary_tokens.or(defaults.max_summary_tokens),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            fetch_cache_ttl: self.fetch_cache_ttl.or(defaults.fetch_cache_ttl),
            default_symbols: self.default_symbols.unwrap_or(defaults.default_symbols),
            default_lookback_days: self
                .default_lookback_days
                .unwrap_or(defaults.default_lookback_days),
            default_chart: self.default_chart.unwrap_or(defaults.default_chart),
            openai_api_key: self.openai_api_key,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompareConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.default_lookback_days, 7);
        assert_eq!(config.default_chart, ChartKind::Line);
        assert!(config.fetch_cache_ttl.is_none());
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CompareConfig::builder()
            .model("gpt-4o-mini")
            .max_summary_tokens(800)
            .fetch_cache_ttl(Duration::from_secs(300))
            .default_symbols("MSFT", "NVDA")
            .default_chart(ChartKind::Bar)
            .openai_api_key("sk-test")
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_summary_tokens, Some(800));
        assert_eq!(config.fetch_cache_ttl, Some(Duration::from_secs(300)));
        assert_eq!(config.default_symbols.1, "NVDA");
        assert!(config.has_api_key());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(CompareConfig::builder().model("  ").build().is_err());
        assert!(CompareConfig::builder().default_lookback_days(-1).build().is_err());
        assert!(
            CompareConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            CompareConfig::builder()
                .request_timeout(Duration::from_millis(500))
                .build()
                .is_err()
        );
        assert!(
            CompareConfig::builder()
                .request_timeout(Duration::from_secs(1))
                .build()
                .is_ok()
        );
        assert!(
            CompareConfig::builder()
                .fetch_cache_ttl(Duration::ZERO)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = CompareConfig::builder().openai_api_key("sk-secret").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
