//! Store failure type shared by all persistence ports

use thiserror::Error;

/// A generic persistence backend failure.
///
/// Store adapters translate every engine-level error into this type; it is
/// always an infrastructure fault, never a domain `NotFound` or `Conflict`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed or is unavailable
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wrap an arbitrary backend error
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_message() {
        let err = StoreError::backend("database is locked");
        assert_eq!(err.to_string(), "storage backend error: database is locked");
    }
}
