//! Bridges rig's `CompletionModel` onto our `LlmProvider` trait.

use async_trait::async_trait;
use rig::completion::CompletionModel;
use rig::completion::message::AssistantContent;
use tracing::debug;

use crate::error::LlmError;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};

/// `LlmProvider` backed by any rig completion model.
pub struct RigAdapter<M> {
    model: M,
    model_name: String,
    provider: &'static str,
}

impl<M> RigAdapter<M> {
    pub fn new(model: M, model_name: &str, provider: &'static str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
            provider,
        }
    }
}

#[async_trait]
impl<M> LlmProvider for RigAdapter<M>
where
    M: CompletionModel + Send + Sync + 'static,
{
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut builder = self.model.completion_request(request.prompt.as_str());
        if let Some(max_tokens) = request.max_tokens {
            builder = builder.max_tokens(u64::from(max_tokens));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_error(self.provider, e.to_string()))?;

        let content = join_text_parts(response.choice.iter());

        debug!(
            provider = self.provider,
            model = %self.model_name,
            response_len = content.len(),
            "Completion received"
        );

        Ok(CompletionResponse { content })
    }
}

/// Concatenate the text parts of an assistant turn as-is. Tool calls and
/// other non-text parts are dropped.
fn join_text_parts<'a>(parts: impl IntoIterator<Item = &'a AssistantContent>) -> String {
    parts
        .into_iter()
        .filter_map(|part| match part {
            AssistantContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

/// Map a provider error message onto our taxonomy, keeping the text intact.
fn classify_error(provider: &str, reason: String) -> LlmError {
    let lowered = reason.to_lowercase();
    let provider = provider.to_string();

    if ["429", "resource_exhausted", "quota"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        LlmError::RateLimited { provider, reason }
    } else if [
        "401",
        "403",
        "unauthenticated",
        "permission_denied",
        "api key not valid",
        "invalid api key",
        "invalid x-api-key",
    ]
    .iter()
    .any(|needle| lowered.contains(needle))
    {
        LlmError::AuthFailed { provider, reason }
    } else {
        LlmError::RequestFailed { provider, reason }
    }
}
