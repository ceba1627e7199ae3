use basket_core::{Money, NewItem, Unit};
use basket_store::{ListStore, MemoryStorage, StoreConfig};
use tempfile::TempDir;

/// Store over empty in-memory storage with seeding turned off.
pub fn empty_store() -> ListStore {
    let config = StoreConfig::in_memory().seed_on_first_run(false);
    let mut store = ListStore::new(config, Box::new(MemoryStorage::new()));
    store.load();
    store.take_notifications();
    store
}

/// Store over `storage` with seeding turned off, already loaded.
pub fn store_over(storage: MemoryStorage) -> ListStore {
    let config = StoreConfig::in_memory().seed_on_first_run(false);
    let mut store = ListStore::new(config, Box::new(storage));
    store.load();
    store
}

/// Creates a temporary data directory and a file-backed config pointing at it.
/// Returns both the config and the temp directory (which must be kept alive).
pub fn temp_config() -> (StoreConfig, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = StoreConfig::new(dir.path()).seed_on_first_run(false);
    (config, dir)
}

/// Dollar amount as Money, for readable test data.
pub fn usd(amount: f64) -> Money {
    Money::from_decimal(amount).expect("finite amount")
}

/// A priced item in pieces.
pub fn priced(name: &str, category: &str, price: f64, quantity: f64) -> NewItem {
    NewItem::new(name, category, quantity, Unit::Pieces, Some(usd(price)))
}

/// An item with no known price.
pub fn unpriced(name: &str, category: &str, quantity: f64) -> NewItem {
    NewItem::new(name, category, quantity, Unit::Pieces, None)
}

/// The "Milk" item from the end-to-end scenario.
pub fn milk() -> NewItem {
    NewItem::new("Milk", "dairy", 1.0, Unit::Liter, Some(usd(2.99)))
}
