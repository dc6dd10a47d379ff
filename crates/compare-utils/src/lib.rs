//! Shared utilities for stock-compare
//!
//! Logging setup and the application-level configuration shared by the
//! library crates and the `stock-compare` binary.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{init_tracing, try_init_tracing};
