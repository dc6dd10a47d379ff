//! Two-stock closing-price comparison
//!
//! This crate fetches daily price history for two ticker symbols, joins the
//! closing prices on date, and can ask a text-generation service for a short
//! comparative write-up. It includes:
//!
//! - A Yahoo Finance data source behind the [`MarketDataSource`] trait, with an
//!   optional time-bounded cache
//! - Outer-join alignment of two series into a [`CombinedSeries`]
//! - A [`Summarizer`] that sends both series to an [`compare_llm::LLMProvider`]
//! - A two-view session state machine ([`SessionState`], [`SessionController`])
//! - A terminal front end (slash commands, tables, text charts)
//!
//! # Example
//!
//! ```rust,ignore
//! use compare_stock::{CompareConfig, SessionController, SessionState, YahooFinanceClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CompareConfig::default();
//!     let controller = SessionController::new(YahooFinanceClient::new());
//!     let mut state = SessionState::with_defaults(&config, chrono::Local::now().date_naive())?;
//!
//!     controller.submit(&mut state).await?;
//!     println!("{} rows", state.combined().map_or(0, |c| c.len()));
//!     Ok(())
//! }
//! ```

pub mod align;
pub mod api;
pub mod cache;
pub mod chart;
pub mod config;
pub mod error;
pub mod interface;
pub mod prompts;
pub mod series;
pub mod session;
pub mod source;
pub mod summarizer;

// Re-export main types for convenience
pub use align::{CombinedRow, CombinedSeries, Side, align};
pub use api::YahooFinanceClient;
pub use cache::CachedSource;
pub use chart::{ChartData, ChartKind, ChartPoint};
pub use config::CompareConfig;
pub use error::{Result, StockError};
pub use series::{DateRange, PriceBar, PriceSeries, Symbol};
pub use session::{SessionController, SessionInputs, SessionState, View};
pub use source::MarketDataSource;
pub use summarizer::Summarizer;
