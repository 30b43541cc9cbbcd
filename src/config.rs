//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};

/// Model used when `INBOX_TRIAGE_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("KEY".to_string()))?;

        let backend = match lookup("INBOX_TRIAGE_LLM_BACKEND") {
            Some(raw) => raw.parse::<LlmBackend>()?,
            None => LlmBackend::default(),
        };

        let model = lookup("INBOX_TRIAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host = lookup("INBOX_TRIAGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("INBOX_TRIAGE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "INBOX_TRIAGE_PORT".to_string(),
                message: format!("'{raw}': {e}"),
            })?,
            None => 5000,
        };

        Ok(Self {
            host,
            port,
            llm: LlmConfig {
                backend,
                api_key: SecretString::from(api_key),
                model,
            },
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
