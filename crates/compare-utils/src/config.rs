//! Application-level configuration

use serde::{Deserialize, Serialize};

/// Process-wide settings that are not specific to any one crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name, shown in the banner
    pub app_name: String,
    /// Default `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_directive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-compare".to_string(),
            log_directive: "warn,compare_stock=info,compare_llm=info".to_string(),
        }
    }
}

impl Config {
    /// Override the default log directive
    pub fn with_log_directive(mut self, directive: impl Into<String>) -> Self {
        self.log_directive = directive.into();
        self
    }
}
