//! Errors returned by the local store gateway.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested entry was not found where the operation requires one.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of entry was looked up ("Game", "User", ...).
        kind: String,
        /// The identifier that did not match.
        id: String,
    },

    /// The backend failed to execute the operation.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found("Game", "d6f1a7b0");
        assert_eq!(err.to_string(), "Game not found: d6f1a7b0");

        let err = StorageError::backend("connection reset");
        assert_eq!(err.to_string(), "Storage backend error: connection reset");
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::not_found("User", "42").is_not_found());
        assert!(!StorageError::backend("boom").is_not_found());
    }
}
