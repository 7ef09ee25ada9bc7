//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// A field value violates a domain constraint
    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },
}

impl DomainError {
    /// Create an invalid-field-value error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field,
            reason: reason.into(),
        }
    }
}
