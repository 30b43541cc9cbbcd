//! Scripted in-process provider for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};

enum Script {
    Reply(String),
    Fail(String),
}

/// Returns a fixed reply (or error) and records every prompt it receives.
pub(crate) struct StubLlm {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self {
            script: Script::Reply(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(reason: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(reason.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt);
        match &self.script {
            Script::Reply(text) => Ok(CompletionResponse {
                content: text.clone(),
            }),
            Script::Fail(reason) => Err(LlmError::RateLimited {
                provider: "stub".to_string(),
                reason: reason.clone(),
            }),
        }
    }
}
