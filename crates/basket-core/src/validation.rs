//! # Validation Module
//!
//! Input validation for list and item forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (forms)                                         │
//! │  ├── THIS MODULE: names, quantities, prices, budgets, category ids     │
//! │  └── Immediate user feedback, submit button disabled on error          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ListStore                                                    │
//! │  └── Trusts its caller. Never rejects input; missing optional fields   │
//! │      (price, comments, storeLocation, budget) are always accepted.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{validate_list_name, validate_quantity};
//! use basket_core::Quantity;
//!
//! assert!(validate_list_name("Groceries").is_ok());
//! assert!(validate_quantity(Quantity::new(0.5)).is_ok());
//! assert!(validate_quantity(Quantity::new(0.0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Quantity};
use crate::types::{Category, NewItem};
use crate::{MAX_NAME_LENGTH, MAX_NOTE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a shopping list name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 100 characters
pub fn validate_list_name(name: &str) -> ValidationResult<()> {
    validate_name("list name", name)
}

/// Validates an item name. Same rules as [`validate_list_name`].
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_name("item name", name)
}

/// Validates an optional free-text field (comments, store location).
pub fn validate_note(field: &str, note: Option<&str>) -> ValidationResult<()> {
    match note {
        Some(text) if text.chars().count() > MAX_NOTE_LENGTH => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NOTE_LENGTH,
        }),
        _ => Ok(()),
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (callers show the whole list)
/// - At most 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive (> 0); fractions are fine
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if !qty.value().is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if qty.value() <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional price. Absent is fine; zero is fine (free items).
///
/// ```rust
/// use basket_core::validation::validate_price;
/// use basket_core::Money;
///
/// assert!(validate_price(None).is_ok());
/// assert!(validate_price(Some(Money::zero())).is_ok());
/// assert!(validate_price(Some(Money::from_cents(-1))).is_err());
/// ```
pub fn validate_price(price: Option<Money>) -> ValidationResult<()> {
    match price {
        Some(p) if p.is_negative() => Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        }),
        _ => Ok(()),
    }
}

/// Validates an optional budget. Absent means "no budget"; if present it
/// must be positive.
pub fn validate_budget(budget: Option<Money>) -> ValidationResult<()> {
    match budget {
        Some(b) if !b.is_positive() => Err(ValidationError::MustBePositive {
            field: "budget".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Reference Validators
// =============================================================================

/// Checks that `category_id` names one of `categories`.
///
/// The store accepts unknown ids; call this when stricter forms want to
/// refuse them.
pub fn validate_category(category_id: &str, categories: &[Category]) -> ValidationResult<()> {
    if categories.iter().any(|c| c.id == category_id) {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory(category_id.to_string()))
    }
}

impl NewItem {
    /// Runs every field validator, stopping at the first failure.
    ///
    /// The category id is not checked here; see [`validate_category`].
    pub fn validate(&self) -> ValidationResult<()> {
        validate_item_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_price(self.price)?;
        validate_note("comments", self.comments.as_deref())?;
        validate_note("store location", self.store_location.as_deref())?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_categories, Unit};

    #[test]
    fn test_validate_list_name() {
        assert!(validate_list_name("Groceries").is_ok());
        assert!(validate_list_name("").is_err());
        assert!(validate_list_name("   ").is_err());
        assert!(validate_list_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::new(1.0)).is_ok());
        assert!(validate_quantity(Quantity::new(0.25)).is_ok());

        assert_eq!(
            validate_quantity(Quantity::new(0.0)),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(Quantity::new(-2.0)).is_err());
        assert!(matches!(
            validate_quantity(Quantity::new(f64::NAN)),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_budget() {
        assert!(validate_budget(None).is_ok());
        assert!(validate_budget(Some(Money::from_cents(5000))).is_ok());
        assert!(validate_budget(Some(Money::zero())).is_err());
    }

    #[test]
    fn test_validate_category() {
        let categories = default_categories();
        assert!(validate_category("dairy", &categories).is_ok());
        assert_eq!(
            validate_category("toys", &categories),
            Err(ValidationError::UnknownCategory("toys".to_string()))
        );
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  milk ").unwrap(), "milk");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }

    #[test]
    fn test_new_item_validate() {
        let ok = NewItem::new("Milk", "dairy", 1.0, Unit::Liter, None);
        assert!(ok.validate().is_ok());

        let no_name = NewItem::new(" ", "dairy", 1.0, Unit::Liter, None);
        assert!(matches!(
            no_name.validate(),
            Err(ValidationError::Required { .. })
        ));

        let long_note = NewItem::new("Milk", "dairy", 1.0, Unit::Liter, None)
            .with_comments("x".repeat(501));
        assert!(matches!(
            long_note.validate(),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
