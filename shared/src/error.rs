//! Errors raised by the advisory core

use thiserror::Error;

/// Errors returned by the crop advisory functions
///
/// All variants describe programmer or input errors; nothing in the core
/// performs I/O, so there is no transient failure to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Unknown crop type: {0}")]
    UnknownCrop(String),
}

impl AdvisorError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdvisorError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for advisory operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
