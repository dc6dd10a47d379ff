//! Natural-language comparison of two price series

use crate::error::{Result, StockError};
use crate::prompts::{COMPARISON_SYSTEM_PROMPT, comparison_user_prompt};
use crate::series::{PriceSeries, Symbol};
use compare_llm::{CompletionRequest, LLMError, LLMProvider, Message};
use std::sync::Arc;
use tracing::{info, instrument};

/// Asks a text-generation service for a markdown comparison of two series
///
/// Every call sends the full data again; responses are never reused.
pub struct Summarizer {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: Option<usize>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: None,
        }
    }

    /// Cap the length of generated summaries
    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the two-message request for the given series
    pub fn build_request(
        &self,
        first_symbol: &Symbol,
        first: &PriceSeries,
        second_symbol: &Symbol,
        second: &PriceSeries,
    ) -> Result<CompletionRequest> {
        let user = comparison_user_prompt(first_symbol, first, second_symbol, second)?;

        Ok(CompletionRequest::builder(&self.model)
            .add_message(Message::system(COMPARISON_SYSTEM_PROMPT))
            .add_message(Message::user(user))
            .max_tokens_opt(self.max_tokens)
            .candidates(1)
            .build())
    }

    /// Request a comparative summary and return the first candidate's text
    #[instrument(skip_all, fields(first = %first_symbol, second = %second_symbol, model = %self.model))]
    pub async fn summarize(
        &self,
        first_symbol: &Symbol,
        first: &PriceSeries,
        second_symbol: &Symbol,
        second: &PriceSeries,
    ) -> Result<String> {
        let request = self.build_request(first_symbol, first, second_symbol, second)?;
        let response = self.provider.complete(request).await?;

        let text = response.first_text().ok_or_else(|| {
            StockError::Summarization(LLMError::UnexpectedResponse(
                "completion contained no text".to_string(),
            ))
        })?;

        info!(
            provider = self.provider.name(),
            tokens = response.usage.total(),
            "Generated comparative summary"
        );
        Ok(text.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use compare_llm::{
        Candidate, CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message,
        StopReason, TokenUsage,
    };
    use std::sync::Mutex;

    /// Provider that replays canned replies and records requests
    pub struct ScriptedProvider {
        replies: Mutex<Vec<std::result::Result<Option<String>, LLMError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        /// Replies are handed out in order
        pub fn new(replies: Vec<std::result::Result<Option<String>, LLMError>>) -> Self {
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn text(reply: &str) -> Self {
            Self::new(vec![Ok(Some(reply.to_string()))])
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> compare_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(LLMError::RequestFailed("no scripted reply".to_string())))?;

            Ok(CompletionResponse {
                candidates: vec![Candidate {
                    message: Message {
                        role: compare_llm::Role::Assistant,
                        content: reply,
                    },
                    stop_reason: StopReason::EndTurn,
                }],
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}
