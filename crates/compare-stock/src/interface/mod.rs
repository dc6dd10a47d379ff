//! Terminal front end
//!
//! Slash commands, table and chart rendering, and the REPL driver used by the
//! `stock-compare` binary.

pub mod commands;
pub mod render;
pub mod repl;

pub use commands::Command;
pub use repl::{CompareRepl, Reply};
