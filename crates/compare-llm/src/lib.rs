//! Text-generation provider abstraction for stock-compare
//!
//! This crate keeps the summarization feature independent of any one vendor:
//!
//! - Role-tagged message types
//! - Completion request/response types, with a request builder
//! - The [`LLMProvider`] trait the summarizer is written against
//! - An OpenAI-compatible chat-completions provider (behind the `openai` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

pub use completion::{Candidate, CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

#[cfg(feature = "openai")]
pub mod providers;
