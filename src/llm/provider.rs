//! Provider trait and request/response types for text generation.

use async_trait::async_trait;

use crate::error::LlmError;

/// A single-shot text generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Raw text returned by the model. No schema is imposed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
}

/// The external text-generation service.
///
/// Implementations hold only static configuration (endpoint, credential,
/// model) and are shared read-only across requests.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier this provider sends requests to.
    fn model_name(&self) -> &str;

    /// Run one blocking, non-streaming generation call.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
