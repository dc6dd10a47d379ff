//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A text-generation service
///
/// Implementations are expected to be non-deterministic; callers must not
/// cache responses on the assumption that identical requests yield identical
/// text.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for the given request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g., "openai")
    fn name(&self) -> &str;
}
