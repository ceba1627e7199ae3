//! # List Store
//!
//! The single owner of the shopping-list collection for a session.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ListStore Lifecycle                                  │
//! │                                                                         │
//! │  ListStore::open(config)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load() ──► stored & well-formed ──► Restored(n)                        │
//! │       │                                                                 │
//! │       ├───► key absent ─────────────► Seeded     (seed lists, saved)    │
//! │       │                                                                 │
//! │       └───► unreadable / malformed ─► Recovered  (raw value backed up,  │
//! │                                                  seed lists, error      │
//! │                                                  notification; seed not │
//! │                                                  saved if backup fails) │
//! │                                                                         │
//! │  mutation ──► clone Vec ──► edit ──► swap Arc ──► save (best-effort)    │
//! │                                                                         │
//! │  NOTE: A failed save is logged and never undoes the mutation. The       │
//! │        in-memory collection is the source of truth for the session.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Found
//! Every operation that names a missing list or item is a silent no-op:
//! nothing changes, nothing is saved, nothing is notified. The return value
//! (`bool` / `Option`) tells the caller whether anything happened.

use basket_core::search;
use basket_core::stats::{group_by_category, BudgetStatus, CategoryGroup, ListSummary, Statistics};
use basket_core::{
    default_categories, default_stores, find_list_mut, list_position, Category, CoreResult, Item,
    ItemUpdate, ListUpdate, Money, NewItem, ShoppingList, Store, Unit, ID_LENGTH,
};
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StorageResult;
use crate::notification::{Notification, Notifications};
use crate::persistence;
use crate::seed::seed_lists;
use crate::storage::{open_storage, KeyValueStorage};

/// Shown when stored lists can't be read at startup.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load your shopping lists";

/// Shown on a failed save when `notify_on_save_failure` is set.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save your shopping lists";

/// Suffix of the key that keeps a copy of unreadable stored data.
const CORRUPT_SUFFIX: &str = ".corrupt";

/// What [`ListStore::load`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored lists were read; carries how many.
    Restored(usize),
    /// Nothing was stored; the seed collection (or nothing) was installed.
    Seeded,
    /// Stored data was unusable and replaced by the seed collection.
    Recovered,
}

/// Returns a fresh short id for which `taken` is false.
///
/// The id is the leading [`ID_LENGTH`] hex characters of a random v4 UUID.
pub fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LENGTH);
        if !taken(&id) {
            return id;
        }
    }
}

/// Current time at the millisecond precision timestamps are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Owns the list collection and keeps storage in step with it.
///
/// ## Example
/// ```rust
/// use basket_core::{Money, NewItem, Unit};
/// use basket_store::{ListStore, StoreConfig};
///
/// let mut store = ListStore::open(StoreConfig::in_memory().seed_on_first_run(false)).unwrap();
/// let list_id = store.add_list("Groceries", Some(Money::from_cents(5000)));
/// store.add_item_to_list(
///     &list_id,
///     NewItem::new("Milk", "dairy", 1.0, Unit::Liter, Some(Money::from_cents(299))),
/// );
///
/// assert_eq!(store.get_list_total(&list_id), Money::from_cents(299));
/// ```
#[derive(Debug)]
pub struct ListStore {
    lists: Arc<Vec<ShoppingList>>,
    categories: Vec<Category>,
    stores: Vec<Store>,
    current_list_id: Option<String>,
    storage: Box<dyn KeyValueStorage>,
    config: StoreConfig,
    notifications: Notifications,
}

impl ListStore {
    /// Creates an empty store over `storage`. Call [`load`](Self::load)
    /// before use.
    pub fn new(config: StoreConfig, storage: Box<dyn KeyValueStorage>) -> Self {
        ListStore {
            lists: Arc::new(Vec::new()),
            categories: default_categories(),
            stores: default_stores(),
            current_list_id: None,
            storage,
            config,
            notifications: Notifications::new(),
        }
    }

    /// Opens the configured storage and loads it.
    ///
    /// Only fails if the storage backend itself can't be opened (e.g. the
    /// data directory can't be created). Bad stored data is recovered from.
    pub fn open(config: StoreConfig) -> StorageResult<Self> {
        let storage = open_storage(&config)?;
        let mut store = ListStore::new(config, storage);
        store.load();
        Ok(store)
    }

    // =========================================================================
    // Load / Save
    // =========================================================================

    /// Replaces the in-memory collection with what storage holds.
    ///
    /// Falls back to the seed collection when the key is absent or the
    /// stored value can't be used. Afterwards the current list is the first
    /// list, or `None` if there are none.
    pub fn load(&mut self) -> LoadOutcome {
        let key = self.config.storage_key.clone();

        let outcome = match persistence::load_lists(&*self.storage, &key) {
            Ok(Some(lists)) => {
                info!(key = %key, count = lists.len(), "Loaded shopping lists");
                let count = lists.len();
                self.lists = Arc::new(lists);
                LoadOutcome::Restored(count)
            }
            Ok(None) => {
                info!(key = %key, seed = self.config.seed_on_first_run, "No stored lists, starting fresh");
                self.lists = Arc::new(self.starting_lists());
                self.persist();
                LoadOutcome::Seeded
            }
            Err(e) => {
                error!(key = %key, error = %e, "Failed to load shopping lists, falling back to seed data");
                self.notifications.error(LOAD_FAILED_MESSAGE);
                self.lists = Arc::new(self.starting_lists());
                if self.back_up_unreadable(&key) {
                    self.persist();
                } else {
                    error!(key = %key, "Keeping unreadable stored value, seed lists not saved");
                }
                LoadOutcome::Recovered
            }
        };

        self.current_list_id = self.lists.first().map(|l| l.id.clone());
        outcome
    }

    /// The seed collection, or nothing when seeding is off.
    fn starting_lists(&self) -> Vec<ShoppingList> {
        if self.config.seed_on_first_run {
            seed_lists(now())
        } else {
            Vec::new()
        }
    }

    /// Copies the unusable value aside, bytes untouched, so the seed save
    /// doesn't destroy it. Returns false if the value is still in place
    /// with no copy, in which case nothing may be written over it.
    fn back_up_unreadable(&mut self, key: &str) -> bool {
        let backup_key = format!("{}{}", key, CORRUPT_SUFFIX);
        match self.storage.copy(key, &backup_key) {
            Ok(true) => {
                warn!(key = %backup_key, "Backed up unreadable shopping lists");
                true
            }
            Ok(false) => true,
            Err(e) => {
                error!(key = %backup_key, error = %e, "Could not back up unreadable shopping lists");
                false
            }
        }
    }

    /// Writes the whole collection to storage.
    ///
    /// Mutations call this themselves and swallow the error; hosts can call
    /// it directly to observe durability.
    pub fn save(&mut self) -> StorageResult<()> {
        persistence::save_lists(&mut *self.storage, &self.config.storage_key, &self.lists)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            error!(
                key = %self.config.storage_key,
                error = %e,
                "Failed to save shopping lists, keeping in-memory state"
            );
            if self.config.notify_on_save_failure {
                self.notifications.error(SAVE_FAILED_MESSAGE);
            }
        }
    }

    /// Runs `edit` on a copy of the collection. An error means nothing to
    /// do: it is logged, the current version stays and nothing is saved.
    /// Otherwise the copy becomes the current version and is saved.
    fn commit<T>(
        &mut self,
        operation: &'static str,
        edit: impl FnOnce(&mut Vec<ShoppingList>) -> CoreResult<T>,
    ) -> Option<T> {
        let mut next = Vec::clone(&self.lists);
        match edit(&mut next) {
            Ok(result) => {
                self.lists = Arc::new(next);
                self.persist();
                Some(result)
            }
            Err(e) => {
                debug!(operation, error = %e, "Nothing to change");
                None
            }
        }
    }

    // =========================================================================
    // List Operations
    // =========================================================================

    /// Appends a new empty list and makes it current. Returns its id.
    ///
    /// A zero budget is stored as no budget. The name is taken as given.
    pub fn add_list(&mut self, name: impl Into<String>, budget: Option<Money>) -> String {
        let name = name.into();
        let budget = budget.filter(|b| !b.is_zero());
        let id = generate_id(|candidate| self.list(candidate).is_some());
        let list = ShoppingList::new_at(id.clone(), name.clone(), budget, now());

        self.commit("add_list", |lists| {
            lists.push(list);
            Ok(())
        });
        self.current_list_id = Some(id.clone());

        info!(list_id = %id, name = %name, "Created shopping list");
        self.notifications
            .success(format!("Created \"{}\" shopping list", name));
        id
    }

    /// Merges `update` into the list and bumps `updated_at`.
    ///
    /// Returns false if no list has `id`.
    pub fn update_list(&mut self, id: &str, update: ListUpdate) -> bool {
        let stamp = now();
        let updated = self
            .commit("update_list", |lists| {
                let list = find_list_mut(lists, id)?;
                update.apply(list);
                list.touch(stamp);
                Ok(())
            })
            .is_some();

        if updated {
            info!(list_id = %id, "Updated list details");
            self.notifications.success("Updated list details");
        }
        updated
    }

    /// Removes the list. If it was current, the first remaining list (or
    /// none) becomes current.
    ///
    /// Returns false if no list has `id`.
    pub fn delete_list(&mut self, id: &str) -> bool {
        let removed = self.commit("delete_list", |lists| {
            let index = list_position(lists, id)?;
            Ok(lists.remove(index))
        });

        let Some(removed) = removed else {
            return false;
        };

        if self.current_list_id.as_deref() == Some(id) {
            self.current_list_id = self.lists.first().map(|l| l.id.clone());
        }

        info!(list_id = %id, items = removed.items.len(), "Deleted shopping list");
        self.notifications
            .success(format!("Deleted \"{}\" list", removed.name));
        true
    }

    // =========================================================================
    // Item Operations
    // =========================================================================

    /// Appends an unchecked item with a fresh id. Returns the id, or `None`
    /// if no list has `list_id`.
    ///
    /// The category id is stored as given.
    pub fn add_item_to_list(&mut self, list_id: &str, new_item: NewItem) -> Option<String> {
        let name = new_item.name.clone();
        let stamp = now();

        let item_id = self.commit("add_item_to_list", |lists| {
            let list = find_list_mut(lists, list_id)?;
            let item_id = generate_id(|candidate| list.contains_item(candidate));
            list.items.push(new_item.into_item(item_id.clone()));
            list.touch(stamp);
            Ok(item_id)
        })?;

        info!(list_id = %list_id, item_id = %item_id, name = %name, "Added item");
        self.notifications.success(format!("Added \"{}\" to list", name));
        Some(item_id)
    }

    /// Merges `update` into the item and bumps the list's `updated_at`.
    ///
    /// Returns false if the list or item doesn't exist.
    pub fn update_item_in_list(&mut self, list_id: &str, item_id: &str, update: ItemUpdate) -> bool {
        let stamp = now();
        let updated = self
            .commit("update_item_in_list", |lists| {
                let list = find_list_mut(lists, list_id)?;
                update.apply(list.require_item_mut(item_id)?);
                list.touch(stamp);
                Ok(())
            })
            .is_some();

        if updated {
            debug!(list_id = %list_id, item_id = %item_id, "Updated item");
        }
        updated
    }

    /// Removes the item and bumps the list's `updated_at`.
    ///
    /// Returns false if the list or item doesn't exist.
    pub fn delete_item_from_list(&mut self, list_id: &str, item_id: &str) -> bool {
        let stamp = now();
        let removed = self
            .commit("delete_item_from_list", |lists| {
                let list = find_list_mut(lists, list_id)?;
                let index = list.item_position(item_id)?;
                list.items.remove(index);
                list.touch(stamp);
                Ok(())
            })
            .is_some();

        if removed {
            info!(list_id = %list_id, item_id = %item_id, "Removed item");
            self.notifications.success("Removed item from list");
        }
        removed
    }

    /// Flips `is_checked` and bumps the list's `updated_at`. Returns the new
    /// checked state, or `None` if the list or item doesn't exist.
    pub fn toggle_item_check(&mut self, list_id: &str, item_id: &str) -> Option<bool> {
        let stamp = now();
        let checked = self.commit("toggle_item_check", |lists| {
            let list = find_list_mut(lists, list_id)?;
            let item = list.require_item_mut(item_id)?;
            item.is_checked = !item.is_checked;
            let checked = item.is_checked;
            list.touch(stamp);
            Ok(checked)
        })?;

        debug!(list_id = %list_id, item_id = %item_id, checked, "Toggled item");
        Some(checked)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of `price × quantity` over priced items; zero for an unknown list.
    pub fn get_list_total(&self, list_id: &str) -> Money {
        self.list(list_id).map_or_else(Money::zero, ShoppingList::total)
    }

    /// [`get_list_total`](Self::get_list_total) restricted to checked items.
    pub fn get_checked_total(&self, list_id: &str) -> Money {
        self.list(list_id)
            .map_or_else(Money::zero, ShoppingList::checked_total)
    }

    /// Items of the list whose name, comments or store location contain
    /// `query`, ignoring case, in list order. Empty for an unknown list.
    pub fn search_items(&self, list_id: &str, query: &str) -> Vec<&Item> {
        match self.list(list_id) {
            Some(list) => search::search_items(&list.items, query),
            None => Vec::new(),
        }
    }

    pub fn lists(&self) -> &[ShoppingList] {
        &self.lists
    }

    /// The current version of the collection. Later mutations never change
    /// a snapshot already handed out.
    pub fn snapshot(&self) -> Arc<Vec<ShoppingList>> {
        Arc::clone(&self.lists)
    }

    pub fn list(&self, id: &str) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn current_list_id(&self) -> Option<&str> {
        self.current_list_id.as_deref()
    }

    /// Navigation state only: no data changes and nothing is saved.
    pub fn set_current_list_id(&mut self, id: Option<String>) {
        self.current_list_id = id;
    }

    /// The current list, if the current id names one.
    pub fn current_list(&self) -> Option<&ShoppingList> {
        self.current_list_id.as_deref().and_then(|id| self.list(id))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn units(&self) -> &'static [Unit] {
        &Unit::ALL
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// Budget progress, or `None` for an unknown list or one with no budget.
    pub fn budget_status(&self, list_id: &str) -> Option<BudgetStatus> {
        self.list(list_id).and_then(BudgetStatus::for_list)
    }

    pub fn list_summaries(&self) -> Vec<ListSummary> {
        self.lists.iter().map(ListSummary::from).collect()
    }

    /// The list's items grouped by category. Empty for an unknown list.
    pub fn items_by_category(&self, list_id: &str) -> Vec<CategoryGroup<'_>> {
        match self.list(list_id) {
            Some(list) => group_by_category(&list.items, &self.categories),
            None => Vec::new(),
        }
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.lists, &self.categories)
    }

    // =========================================================================
    // Notifications & Storage
    // =========================================================================

    /// Removes and returns the pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        &*self.storage
    }

    /// Consumes the store, handing back its storage backend.
    pub fn into_storage(self) -> Box<dyn KeyValueStorage> {
        self.storage
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::StorageError;

    fn empty_store() -> ListStore {
        let config = StoreConfig::in_memory().seed_on_first_run(false);
        let mut store = ListStore::new(config, Box::new(MemoryStorage::new()));
        store.load();
        store
    }

    fn milk() -> NewItem {
        NewItem::new("Milk", "dairy", 1.0, Unit::Liter, Some(Money::from_cents(299)))
    }

    #[test]
    fn test_generate_id_shape_and_retry() {
        let id = generate_id(|_| false);
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let first = std::cell::Cell::new(true);
        let id = generate_id(|_| first.replace(false));
        assert_eq!(id.len(), ID_LENGTH);
    }

    #[test]
    fn test_add_list_sets_current_and_drops_zero_budget() {
        let mut store = empty_store();
        let id = store.add_list("Party", Some(Money::zero()));

        assert_eq!(store.current_list_id(), Some(id.as_str()));
        let list = store.list(&id).unwrap();
        assert_eq!(list.budget, None);
        assert_eq!(list.created_at, list.updated_at);
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_mutations() {
        let mut store = empty_store();
        let id = store.add_list("Groceries", None);
        let before = store.snapshot();

        store.add_item_to_list(&id, milk()).unwrap();

        assert!(before[0].items.is_empty());
        assert_eq!(store.lists()[0].items.len(), 1);
    }

    #[test]
    fn test_not_found_leaves_state_alone() {
        let mut store = empty_store();
        let id = store.add_list("Groceries", None);
        store.take_notifications();
        let before = store.snapshot();

        assert!(!store.update_list("missing", ListUpdate::rename("x")));
        assert!(!store.delete_list("missing"));
        assert!(store.add_item_to_list("missing", milk()).is_none());
        assert!(!store.update_item_in_list(&id, "missing", ItemUpdate::default()));
        assert!(!store.delete_item_from_list(&id, "missing"));
        assert!(store.toggle_item_check(&id, "missing").is_none());

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store.take_notifications().is_empty());
    }

    #[test]
    fn test_update_item_bumps_updated_at() {
        let mut store = empty_store();
        let list_id = store.add_list("Groceries", None);
        let item_id = store.add_item_to_list(&list_id, milk()).unwrap();
        let before = store.list(&list_id).unwrap().updated_at;

        let updated = store.update_item_in_list(
            &list_id,
            &item_id,
            ItemUpdate {
                price: Some(None),
                ..Default::default()
            },
        );

        assert!(updated);
        let list = store.list(&list_id).unwrap();
        assert!(list.updated_at >= before);
        assert_eq!(list.item(&item_id).unwrap().price, None);
        assert!(store.get_list_total(&list_id).is_zero());
    }

    #[test]
    fn test_set_current_list_id_does_not_save() {
        let mut store = empty_store();
        let id = store.add_list("Groceries", None);
        let saved = store.storage().get("shoppingLists").unwrap();

        store.set_current_list_id(None);
        assert!(store.current_list().is_none());
        store.set_current_list_id(Some(id.clone()));
        assert_eq!(store.current_list().map(|l| l.name.as_str()), Some("Groceries"));

        assert_eq!(store.storage().get("shoppingLists").unwrap(), saved);
    }

    #[test]
    fn test_save_failure_notifies_when_configured() {
        let config = StoreConfig::in_memory()
            .seed_on_first_run(false)
            .notify_on_save_failure(true);
        let mut store = ListStore::new(config, Box::new(MemoryStorage::with_quota(64)));
        store.load();

        let id = store.add_list("A list with a name long enough to overflow the quota", None);

        assert!(store.list(&id).is_some());
        assert!(matches!(store.save(), Err(StorageError::QuotaExceeded { .. })));
        let messages: Vec<_> = store
            .take_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert!(messages.contains(&SAVE_FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn test_catalog_accessors() {
        let store = empty_store();
        assert_eq!(store.categories().len(), 11);
        assert_eq!(store.stores().len(), 6);
        assert_eq!(store.units().len(), 8);
        assert_eq!(store.category("frozen").map(|c| c.name.as_str()), Some("Frozen Foods"));
        assert!(store.category("toys").is_none());
    }
}
