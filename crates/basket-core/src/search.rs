//! # Item Search
//!
//! Case-insensitive substring search over a list's items.
//!
//! ## Matched Fields
//! ```text
//! query "aisle 2"
//!    │
//!    ├── name            "Milk"            ✗
//!    ├── comments        "2% fat"          ✗
//!    └── storeLocation   "Aisle 2"         ✓  → match
//! ```
//!
//! Results keep the list's insertion order. An empty query matches every
//! item; presentation code usually short-circuits that case itself.

use crate::types::Item;

/// Returns true if `item` matches `query`.
///
/// `query` must already be lowercased; see [`search_items`].
fn matches_lowercase(item: &Item, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    contains(&item.name)
        || item.comments.as_deref().is_some_and(|c| contains(c))
        || item.store_location.as_deref().is_some_and(|l| contains(l))
}

/// Returns true if `item`'s name, comments or store location contains
/// `query`, ignoring case.
pub fn item_matches(item: &Item, query: &str) -> bool {
    matches_lowercase(item, &query.to_lowercase())
}

/// Filters `items` down to the ones matching `query`, keeping order.
///
/// ```rust
/// use basket_core::search::search_items;
/// use basket_core::{NewItem, Unit};
///
/// let items = vec![
///     NewItem::new("Milk", "dairy", 1.0, Unit::Liter, None).into_item("a".into()),
///     NewItem::new("Bread", "bakery", 1.0, Unit::Pieces, None).into_item("b".into()),
/// ];
/// let found = search_items(&items, "milk");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "Milk");
/// ```
pub fn search_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowercase(item, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewItem, Unit};

    fn fixtures() -> Vec<Item> {
        vec![
            NewItem::new("Milk", "dairy", 1.0, Unit::Liter, None)
                .with_store_location("Aisle 2")
                .into_item("a".to_string()),
            NewItem::new("Bread", "bakery", 1.0, Unit::Pieces, None)
                .with_comments("whole grain, not MILK bread")
                .into_item("b".to_string()),
            NewItem::new("Apples", "produce", 2.0, Unit::Kilogram, None)
                .into_item("c".to_string()),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = fixtures();
        let ids: Vec<_> = search_items(&items, "milk").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let upper: Vec<_> = search_items(&items, "MILK").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(upper, ids);
    }

    #[test]
    fn test_search_matches_store_location() {
        let items = fixtures();
        let found = search_items(&items, "aisle");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let items = fixtures();
        assert_eq!(search_items(&items, "").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let items = fixtures();
        assert!(search_items(&items, "cheese").is_empty());
        assert!(!item_matches(&items[2], "grain"));
    }
}
