//! Text-generation backends.
//!
//! Every backend goes through a rig-core client; the resulting completion
//! model is wrapped in a [`RigAdapter`] so the relay only ever sees
//! `Arc<dyn LlmProvider>`. Gemini is the default.

pub mod provider;
mod rig_adapter;
#[cfg(test)]
pub(crate) mod stub;

pub use provider::*;
pub use rig_adapter::RigAdapter;

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use rig::client::CompletionClient;
use rig::providers::{anthropic, gemini, openai};
use secrecy::ExposeSecret;

use crate::error::{ConfigError, LlmError};

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmBackend {
    #[default]
    Gemini,
    OpenAi,
    Anthropic,
}

impl LlmBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(ConfigError::InvalidValue {
                key: "INBOX_TRIAGE_LLM_BACKEND".to_string(),
                message: format!("unknown backend '{other}' (expected gemini, openai or anthropic)"),
            }),
        }
    }
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Build the provider for `config.backend`. Called once at startup.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let key = config.api_key.expose_secret();

    let provider = match config.backend {
        LlmBackend::Gemini => {
            let client: rig::client::Client<gemini::client::GeminiExt> =
                gemini::Client::new(key).map_err(|e| client_error(config.backend, e))?;
            adapt(client, config)
        }
        LlmBackend::OpenAi => {
            let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
                openai::Client::new(key).map_err(|e| client_error(config.backend, e))?;
            adapt(client, config)
        }
        LlmBackend::Anthropic => {
            let client: rig::client::Client<anthropic::client::AnthropicExt> =
                anthropic::Client::new(key).map_err(|e| client_error(config.backend, e))?;
            adapt(client, config)
        }
    };

    Ok(provider)
}

fn adapt<C>(client: C, config: &LlmConfig) -> Arc<dyn LlmProvider>
where
    C: CompletionClient,
    C::CompletionModel: Send + Sync + 'static,
{
    let provider = config.backend.as_str();
    let model = client.completion_model(&config.model);
    tracing::info!(provider, model = %config.model, "Model provider ready");
    Arc::new(RigAdapter::new(model, &config.model, provider))
}

fn client_error(backend: LlmBackend, e: impl Display) -> LlmError {
    LlmError::RequestFailed {
        provider: backend.as_str().to_string(),
        reason: format!("client construction failed: {e}"),
    }
}
