//! CLI error types.

use kc_client_policy::PolicyError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// API error.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Client policy operation failed.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.into(),
        }
    }
}

impl From<CliError> for PolicyError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Api { status, message } => Self::Api { status, message },
            CliError::Policy(inner) => inner,
            other => Self::Transport(other.to_string()),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
