//! # Storage Error Types
//!
//! Error types for local persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds key context and categorization      │
//! │       │                                                                 │
//! │       ├── load():  seed data substituted, user notified                │
//! │       └── save():  logged, in-memory state kept, session continues     │
//! │                                                                         │
//! │  Nothing here is fatal. Mutations never return a StorageError.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The list collection could not be encoded or decoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The value does not fit in the storage budget.
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Storage can't be reached at all (no data directory on this platform).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Key contains characters that can't be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// JSON parsed but breaks a collection invariant (duplicate ids, ...).
    #[error("Persisted data is malformed: {0}")]
    Malformed(String),
}

impl StorageError {
    /// Wraps an I/O error with the key it was working on.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates a Malformed error.
    pub fn malformed(message: impl Into<String>) -> Self {
        StorageError::Malformed(message.into())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::QuotaExceeded {
            needed: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: 2048 bytes needed, limit is 1024"
        );

        let err = StorageError::malformed("duplicate list id 'abc'");
        assert_eq!(
            err.to_string(),
            "Persisted data is malformed: duplicate list id 'abc'"
        );
    }

    #[test]
    fn test_serde_error_converts() {
        let parse_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: StorageError = parse_err.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
