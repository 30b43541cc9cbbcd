//! Error types for Inbox Triage.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
///
/// `Display` output of these is what callers see in the `erro` field of a
/// failed relay, so the messages stay close to what the provider reported.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited: {reason}")]
    RateLimited { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}: {reason}")]
    AuthFailed { provider: String, reason: String },
}

/// Failures of a single relay call.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The designated form field was absent or empty.
    #[error("Missing input field: {field}")]
    MissingInput { field: String },

    /// The model call itself failed.
    #[error("{0}")]
    Delegate(#[from] LlmError),

    /// The model answered, but with nothing usable.
    #[error("Unparseable model response")]
    UnparseableResponse { raw: String },
}
