//! Application-level errors
//!
//! `NotFound` and `Conflict` are the two domain failures the aggregates
//! raise deliberately; both carry the entity kind and the offending
//! identifier or key so the boundary layer can map them without parsing
//! message text. Store failures are infrastructure errors and are never
//! folded into the domain variants.

use domain::DomainError;
use thiserror::Error;

use crate::ports::StoreError;

/// The entity kinds named by aggregate errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    Department,
    Employee,
}

impl EntityKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Department => "Department",
            Self::Employee => "Employee",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Resolution of an identifier along the ancestor chain failed
    #[error("{message}")]
    NotFound {
        kind: EntityKind,
        id: String,
        message: String,
    },

    /// Uniqueness violation on a secondary key (company name, employee email)
    #[error("{message}")]
    Conflict {
        kind: EntityKind,
        key: String,
        message: String,
    },

    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persistence backend failure, propagated as-is
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplicationError {
    /// Check whether this error is a deliberate domain failure rather than
    /// an infrastructure fault
    #[must_use]
    pub const fn is_domain_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Conflict { .. } | Self::Domain(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_labels() {
        assert_eq!(EntityKind::Company.to_string(), "Company");
        assert_eq!(EntityKind::Department.to_string(), "Department");
        assert_eq!(EntityKind::Employee.to_string(), "Employee");
    }

    #[test]
    fn not_found_displays_its_message() {
        let err = ApplicationError::NotFound {
            kind: EntityKind::Company,
            id: "42".to_string(),
            message: "Company with id 42 was not found".to_string(),
        };
        assert_eq!(err.to_string(), "Company with id 42 was not found");
    }

    #[test]
    fn conflict_is_a_domain_failure() {
        let err = ApplicationError::Conflict {
            kind: EntityKind::Employee,
            key: "a@b.com".to_string(),
            message: "taken".to_string(),
        };
        assert!(err.is_domain_failure());
    }

    #[test]
    fn store_error_is_not_a_domain_failure() {
        let err = ApplicationError::Store(StoreError::Backend("disk full".to_string()));
        assert!(!err.is_domain_failure());
    }
}
