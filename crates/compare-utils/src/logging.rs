//! Logging and tracing utilities

use crate::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_directive))
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins over `config.log_directive` when set. Panics if a global
/// subscriber is already installed; use [`try_init_tracing`] in tests.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Like [`init_tracing`], but returns `false` instead of panicking when a
/// subscriber is already installed
pub fn try_init_tracing(config: &Config) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
