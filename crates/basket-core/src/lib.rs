//! # basket-core: Pure Shopping-List Logic
//!
//! This crate holds the shopping-list domain: lists, items, money, totals,
//! search and statistics. Everything here is a pure function over values;
//! the stateful store and its storage live in `basket-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Basket Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (lists, detail, stats pages)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut ListStore                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-store (ListStore)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │   stats   │  │   │
//! │  │   │ List/Item │  │   Money   │  │  filter   │  │  budget   │  │   │
//! │  │   │ Category  │  │ Quantity  │  │           │  │  summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ShoppingList, Item, Category, Unit, ...)
//! - [`money`] - Money in integer cents, Quantity
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side input validation
//! - [`search`] - Case-insensitive item search
//! - [`stats`] - Budget status, summaries, spending statistics
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Item, Money, Quantity, Unit, ShoppingList};
//!
//! let mut list = ShoppingList::new("list1", "Groceries", None);
//! list.items.push(Item {
//!     id: "a".to_string(),
//!     name: "Milk".to_string(),
//!     category_id: "dairy".to_string(),
//!     quantity: Quantity::new(2.0),
//!     unit: Unit::Liter,
//!     price: Some(Money::from_cents(299)),
//!     is_checked: false,
//!     comments: None,
//!     store_location: None,
//! });
//!
//! assert_eq!(list.total().cents(), 598);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod search;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the serialized list collection.
///
/// Kept identical to the key the web build used so existing local data
/// is picked up unchanged.
pub const STORAGE_KEY: &str = "shoppingLists";

/// Length of generated list and item ids.
pub const ID_LENGTH: usize = 9;

/// Maximum length of a list or item name accepted by [`validation`].
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of free-text item fields (comments, store location).
pub const MAX_NOTE_LENGTH: usize = 500;
