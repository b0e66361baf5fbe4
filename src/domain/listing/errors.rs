//! Errors surfaced by list loading and record mutations.

use thiserror::Error;

use crate::domain::foundation::{EntityId, ErrorCode, FormErrors, ValidationError};

/// Failure of a list, detail or mutation operation.
///
/// None of these are fatal: the view keeps its last valid state.
#[derive(Debug, Clone, Error)]
pub enum ListError {
    /// Transport failure (connection refused, DNS, 5xx without payload).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Business error returned by the server, e.g. a duplicate name.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Record not found: {0}")]
    NotFound(EntityId),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Local form validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    #[error("Missing permission: {0}")]
    Forbidden(String),

    #[error("Invalid list state: {0}")]
    InvalidState(#[from] ValidationError),
}

impl ListError {
    pub fn network(message: impl Into<String>) -> Self {
        ListError::Network(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ListError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ListError::Network(_) => ErrorCode::NetworkError,
            ListError::Timeout { .. } => ErrorCode::Timeout,
            ListError::Rejected { .. } => ErrorCode::Conflict,
            ListError::NotFound(_) => ErrorCode::NotFound,
            ListError::Decode(_) => ErrorCode::DecodeFailed,
            ListError::Validation(_) => ErrorCode::ValidationFailed,
            ListError::Forbidden(_) => ErrorCode::Forbidden,
            ListError::InvalidState(_) => ErrorCode::InvalidStateTransition,
        }
    }

    /// True for transport problems worth retrying with the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ListError::Network(_) | ListError::Timeout { .. })
    }

    /// Message suitable for a toast or inline alert.
    pub fn user_message(&self) -> String {
        match self {
            ListError::Rejected { message, .. } => message.clone(),
            ListError::Validation(_) => "Please correct the highlighted fields".to_string(),
            ListError::Forbidden(_) => "You do not have permission for this action".to_string(),
            ListError::NotFound(_) => "The record no longer exists".to_string(),
            _ => "Something went wrong while talking to the server".to_string(),
        }
    }
}

impl From<FormErrors> for ListError {
    fn from(errors: FormErrors) -> Self {
        ListError::Validation(errors)
    }
}
