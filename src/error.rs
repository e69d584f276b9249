//! Error taxonomy for the orchestration layer
//!
//! Every failure is returned to the caller as a typed value carrying, where
//! available, the HTTP status and the backend-supplied detail text unmodified.
//! Nothing is swallowed and nothing is retried here; the single documented
//! fallback lives in the merchant orchestrator.

use crate::config::ConfigError;
use crate::transport::ApiError;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Decode a JSON response body into its typed model; a shape mismatch is a
/// transport-level decoding failure, not a backend error.
pub(crate) fn decode<T: DeserializeOwned>(value: serde_json::Value) -> ConsoleResult<T> {
    serde_json::from_value(value).map_err(|e| ConsoleError::Transport {
        status: None,
        message: format!("invalid response body: {}", e),
    })
}

#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    /// Preferred address unreachable or the route does not exist.
    #[error("Routing failure: {message}")]
    Routing { message: String },

    /// The backend rejected the request body; detail text is verbatim.
    #[error("Validation failure: {message}")]
    Validation { message: String },

    /// Credential or identifier not recognized by the backend.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Generic network, timeout, or decoding failure.
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation {
            message: message.into(),
        }
    }

    /// HTTP status sourced from the backend, when the failure carried one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ConsoleError::NotFound { .. } => Some(404),
            ConsoleError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ApiError> for ConsoleError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status: 404, detail } => ConsoleError::NotFound { message: detail },
            ApiError::Http {
                status: 400 | 422,
                detail,
            } => ConsoleError::Validation { message: detail },
            ApiError::Http { status, detail } => ConsoleError::Transport {
                status: Some(status),
                message: detail,
            },
            ApiError::Network { message, connect } => {
                if connect {
                    ConsoleError::Routing { message }
                } else {
                    ConsoleError::Transport {
                        status: None,
                        message,
                    }
                }
            }
            ApiError::Decode { message } => ConsoleError::Transport {
                status: None,
                message,
            },
        }
    }
}
