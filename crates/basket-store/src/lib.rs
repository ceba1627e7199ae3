//! # basket-store: Shopping-List Store for Basket
//!
//! This crate owns the live list collection for a session and keeps a
//! durable JSON copy of it under a single storage key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Data Flow                                 │
//! │                                                                         │
//! │  UI event (check item, add list, ...)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   basket-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ListStore   │    │  persistence  │    │   storage    │  │   │
//! │  │   │  (store.rs)   │───►│ encode/decode │───►│ File/Memory  │  │   │
//! │  │   │               │    │   JSON array  │    │ key → value  │  │   │
//! │  │   │ notifications │    └───────────────┘    └──────────────┘  │   │
//! │  │   └───────────────┘                                            │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Data directory                              │   │
//! │  │   ~/.local/share/lists/shoppingLists.json                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The ListStore and its operations
//! - [`config`] - Store configuration
//! - [`storage`] - Key-value storage backends
//! - [`persistence`] - Stored JSON layout
//! - [`notification`] - User-facing notification queue
//! - [`seed`] - First-run example lists
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use basket_store::{ListStore, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let mut store = ListStore::open(config)?;
//!
//! let list_id = store.add_list("Weekend BBQ", None);
//! for note in store.take_notifications() {
//!     println!("{}", note.message);
//! }
//! # Ok::<(), basket_store::StorageError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod notification;
pub mod persistence;
pub mod seed;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use notification::{Notification, NotificationLevel};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{ListStore, LoadOutcome};
