//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Lookup failures from the checked accessors     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  basket-store errors (separate crate)                                  │
//! │  └── StorageError     - Local storage read/write failures              │
//! │                                                                         │
//! │  Store mutations never surface these for missing ids: a missing list   │
//! │  or item is a silent no-op there.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Returned by [`find_list_mut`](crate::types::find_list_mut),
/// [`ShoppingList::require_item_mut`](crate::types::ShoppingList::require_item_mut)
/// and [`ShoppingList::item_position`](crate::types::ShoppingList::item_position).
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Shopping list cannot be found.
    #[error("Shopping list not found: {0}")]
    ListNotFound(String),

    /// Item cannot be found in the given list.
    #[error("Item {item_id} not found in list {list_id}")]
    ItemNotFound { list_id: String, item_id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The store trusts its caller; these are produced by the helpers in
/// [`crate::validation`] which the presentation layer runs before calling in.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Number is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Category id is not part of the known category set.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound {
            list_id: "abc".to_string(),
            item_id: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "Item xyz not found in list abc");

        let err = CoreError::ListNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Shopping list not found: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::UnknownCategory("toys".to_string());
        assert_eq!(err.to_string(), "Unknown category: toys");
    }
}
