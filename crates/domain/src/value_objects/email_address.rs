//! Email address value object
//!
//! A validated, lowercase-normalized email address. Employee email
//! uniqueness is enforced at the service layer; this type only guarantees
//! syntactic validity.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated email address
///
/// # Examples
///
/// ```
/// use domain::EmailAddress;
///
/// let email = EmailAddress::new("John.Doe@Example.com").unwrap();
/// assert_eq!(email.as_str(), "john.doe@example.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, trimming whitespace and normalizing to
    /// lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmailAddress`] if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidEmailAddress(candidate.value.clone()))?;

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the value object, returning the inner string
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
