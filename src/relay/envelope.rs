//! Result envelope returned by every relay endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::RelayError;

/// Message returned when the designated field is missing.
pub const MISSING_INPUT_MESSAGE: &str = "Nenhum texto fornecido.";

/// Message returned when the model answered with nothing usable.
pub const UNPARSEABLE_MESSAGE: &str = "Falha ao analisar a resposta do modelo.";

/// Outcome of one relay call, serialized with the service's public field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelayEnvelope {
    Success {
        sucesso: bool,
        emails: String,
    },
    MissingInput {
        erro: String,
    },
    DelegateFailure {
        sucesso: bool,
        erro: String,
    },
    Unparseable {
        sucesso: bool,
        mensagem: String,
        resposta_bruta: String,
    },
}

impl RelayEnvelope {
    pub fn success(payload: impl Into<String>) -> Self {
        Self::Success {
            sucesso: true,
            emails: payload.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The trimmed model text, when the call succeeded.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Success { emails, .. } => Some(emails.as_str()),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::MissingInput { .. } => StatusCode::BAD_REQUEST,
            Self::DelegateFailure { .. } | Self::Unparseable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RelayError> for RelayEnvelope {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingInput { .. } => Self::MissingInput {
                erro: MISSING_INPUT_MESSAGE.to_string(),
            },
            RelayError::Delegate(e) => Self::DelegateFailure {
                sucesso: false,
                erro: e.to_string(),
            },
            RelayError::UnparseableResponse { raw } => Self::Unparseable {
                sucesso: false,
                mensagem: UNPARSEABLE_MESSAGE.to_string(),
                resposta_bruta: raw,
            },
        }
    }
}

impl From<Result<String, RelayError>> for RelayEnvelope {
    fn from(result: Result<String, RelayError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => e.into(),
        }
    }
}

impl IntoResponse for RelayEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
