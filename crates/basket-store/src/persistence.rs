//! # Persisted Layout
//!
//! Encodes the list collection as the JSON value stored under the storage
//! key, and decodes it back.
//!
//! ## Layout
//! ```json
//! [
//!   {
//!     "id": "k3j9x0a2b",
//!     "name": "Groceries",
//!     "createdAt": "2024-05-01T12:00:00.000Z",
//!     "updatedAt": "2024-05-01T12:05:31.250Z",
//!     "budget": 100.0,
//!     "items": [
//!       { "id": "p0q8w2e1r", "name": "Milk", "categoryId": "dairy",
//!         "quantity": 1.0, "unit": "l", "price": 2.99, "isChecked": false,
//!         "storeLocation": "Aisle 2" }
//!     ]
//!   }
//! ]
//! ```
//!
//! Decoding also checks the id invariants: list ids unique in the
//! collection, item ids unique in each list. A value that breaks them is
//! reported as [`StorageError::Malformed`] and treated like unreadable data.

use basket_core::ShoppingList;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStorage;

/// Serializes the collection to its stored JSON form.
pub fn encode_lists(lists: &[ShoppingList]) -> StorageResult<String> {
    Ok(serde_json::to_string(lists)?)
}

/// Parses and checks a stored JSON value.
pub fn decode_lists(raw: &str) -> StorageResult<Vec<ShoppingList>> {
    let lists: Vec<ShoppingList> = serde_json::from_str(raw)?;
    check_invariants(&lists)?;
    Ok(lists)
}

fn check_invariants(lists: &[ShoppingList]) -> StorageResult<()> {
    let mut list_ids = HashSet::new();

    for list in lists {
        if !list_ids.insert(list.id.as_str()) {
            return Err(StorageError::malformed(format!(
                "duplicate list id '{}'",
                list.id
            )));
        }

        let mut item_ids = HashSet::new();
        for item in &list.items {
            if !item_ids.insert(item.id.as_str()) {
                return Err(StorageError::malformed(format!(
                    "duplicate item id '{}' in list '{}'",
                    item.id, list.id
                )));
            }
        }

        if list.updated_at < list.created_at {
            warn!(list_id = %list.id, "Stored list has updatedAt before createdAt");
        }
    }

    Ok(())
}

/// Reads the collection under `key`.
///
/// ## Returns
/// - `Ok(Some(lists))` when a well-formed value is stored
/// - `Ok(None)` when the key is absent
/// - `Err(_)` when the value can't be read, parsed, or breaks an invariant
pub fn load_lists(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> StorageResult<Option<Vec<ShoppingList>>> {
    let Some(raw) = storage.get(key)? else {
        debug!(key, "No stored shopping lists");
        return Ok(None);
    };

    let lists = decode_lists(&raw)?;
    debug!(key, count = lists.len(), "Decoded stored shopping lists");
    Ok(Some(lists))
}

/// Writes the whole collection under `key`.
pub fn save_lists(
    storage: &mut dyn KeyValueStorage,
    key: &str,
    lists: &[ShoppingList],
) -> StorageResult<()> {
    let raw = encode_lists(lists)?;
    storage.set(key, &raw)?;
    debug!(key, count = lists.len(), bytes = raw.len(), "Saved shopping lists");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use basket_core::{Money, NewItem, Unit};
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<ShoppingList> {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut list = ShoppingList::new_at("l1", "Groceries", Some(Money::from_cents(10000)), created);
        list.items.push(
            NewItem::new("Milk", "dairy", 1.0, Unit::Liter, Some(Money::from_cents(299)))
                .with_store_location("Aisle 2")
                .into_item("i1".to_string()),
        );
        list.items.push(
            NewItem::new("Apples", "produce", 0.5, Unit::Kilogram, None).into_item("i2".to_string()),
        );
        vec![list]
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let lists = sample();
        let decoded = decode_lists(&encode_lists(&lists).unwrap()).unwrap();
        assert_eq!(decoded, lists);
    }

    #[test]
    fn test_layout_field_names() {
        let raw = encode_lists(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value[0]["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(value[0]["budget"], 100.0);
        assert_eq!(value[0]["items"][0]["price"], 2.99);
        assert_eq!(value[0]["items"][0]["storeLocation"], "Aisle 2");
        assert!(value[0]["items"][1]["price"].is_null());
    }

    #[test]
    fn test_decodes_browser_timestamps() {
        let raw = r#"[{"id":"a","name":"Weekly","createdAt":"2024-03-02T09:15:00.000Z",
            "updatedAt":"2024-03-02T10:00:00.500Z","budget":null,"items":[]}]"#;
        let lists = decode_lists(raw).unwrap();
        assert_eq!(lists[0].budget, None);
        assert_eq!(lists[0].updated_at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut lists = sample();
        lists.push(lists[0].clone());
        let raw = encode_lists(&lists).unwrap();
        assert!(matches!(decode_lists(&raw), Err(StorageError::Malformed(_))));

        let mut lists = sample();
        let dup = lists[0].items[0].clone();
        lists[0].items.push(dup);
        let raw = encode_lists(&lists).unwrap();
        assert!(matches!(decode_lists(&raw), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            decode_lists("{not json"),
            Err(StorageError::Serialization(_))
        ));
        assert!(decode_lists(r#"{"id":"a"}"#).is_err());
    }

    #[test]
    fn test_load_and_save() {
        let mut storage = MemoryStorage::new();
        assert!(load_lists(&storage, "shoppingLists").unwrap().is_none());

        save_lists(&mut storage, "shoppingLists", &sample()).unwrap();
        let loaded = load_lists(&storage, "shoppingLists").unwrap().unwrap();
        assert_eq!(loaded, sample());
    }
}
