mod fixtures;
pub use fixtures::*;

// Re-export commonly used types for tests
pub use basket_core::{ItemUpdate, ListUpdate, Money, NewItem, Quantity, ShoppingList, Unit};
pub use basket_store::{
    FileStorage, KeyValueStorage, ListStore, LoadOutcome, MemoryStorage, NotificationLevel,
    StorageError, StoreConfig,
};
