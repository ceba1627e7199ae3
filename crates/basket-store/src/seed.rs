//! # Seed Lists
//!
//! The example collection a fresh install starts with: one "Groceries"
//! list with a $100 budget and two items. Used when nothing is stored yet
//! or when stored data can't be read.

use basket_core::{Money, NewItem, ShoppingList, Unit};
use chrono::{DateTime, Utc};

use crate::store::generate_id;

/// Builds the seed collection stamped with `now`.
///
/// Ids are freshly generated on every call.
pub fn seed_lists(now: DateTime<Utc>) -> Vec<ShoppingList> {
    let mut groceries = ShoppingList::new_at(
        generate_id(|_| false),
        "Groceries",
        Some(Money::from_cents(10_000)),
        now,
    );

    let items = [
        NewItem::new("Milk", "dairy", 1.0, Unit::Liter, Some(Money::from_cents(299)))
            .with_store_location("Aisle 2"),
        NewItem::new("Bread", "bakery", 1.0, Unit::Pieces, Some(Money::from_cents(349)))
            .with_store_location("Bakery section"),
    ];

    for new_item in items {
        let id = generate_id(|candidate| groceries.contains_item(candidate));
        groceries.items.push(new_item.into_item(id));
    }

    vec![groceries]
}
