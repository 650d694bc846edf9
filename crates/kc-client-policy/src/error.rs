//! Client policy error types.

use thiserror::Error;

use crate::messages;

/// Form validation failures. Each maps to a message key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The name field is empty.
    #[error("name is required")]
    NameRequired,

    /// Another policy already uses the name.
    #[error("a client policy named '{0}' already exists")]
    NameTaken(String),
}

impl FormError {
    /// Message key shown next to the field.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::NameRequired => messages::REQUIRED,
            Self::NameTaken(_) => messages::NAME_TAKEN,
        }
    }
}

/// Errors raised while editing client policies.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The form did not pass validation; nothing was submitted.
    #[error("validation error: {0}")]
    Validation(#[from] FormError),

    /// The policy list has not been fetched yet.
    #[error("client policies have not been loaded")]
    NotLoaded,

    /// Referenced entity does not exist.
    #[error("{entity_type} not found: {name}")]
    NotFound {
        /// Type of entity (e.g. "Client policy", "Condition").
        entity_type: &'static str,
        /// Name or index of the entity.
        name: String,
    },

    /// The admin API answered with an error status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// `confirm` was called with no dialog open.
    #[error("no confirmation pending")]
    NoPendingConfirmation,
}

impl PolicyError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Whether the error came from local validation rather than the server.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the error came back from the admin API or its transport.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Transport(_))
    }
}

/// Result type for client policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
