//! # Store Configuration
//!
//! Where the list collection is stored and how the store reacts to
//! storage failures.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BASKET_*`)
//! 2. Builder calls in the host application
//! 3. Defaults (this file)
//!
//! ## Data Directory
//! - **macOS**: `~/Library/Application Support/com.basket.lists/`
//! - **Windows**: `%APPDATA%\basket\lists\data\`
//! - **Linux**: `~/.local/share/lists/`
//!
//! Set `BASKET_DATA_DIR` to use a custom directory.

use basket_core::STORAGE_KEY;
use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::{StorageError, StorageResult};

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "BASKET_DATA_DIR";
/// Environment variable overriding the storage key.
pub const ENV_STORAGE_KEY: &str = "BASKET_STORAGE_KEY";
/// Environment variable enabling save-failure notifications.
pub const ENV_NOTIFY_SAVE_FAILURES: &str = "BASKET_NOTIFY_SAVE_FAILURES";

/// Store configuration.
///
/// ## Example
/// ```rust
/// use basket_store::StoreConfig;
///
/// let config = StoreConfig::new("./data")
///     .storage_key("shoppingLists")
///     .notify_on_save_failure(true);
/// assert!(config.data_dir.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Directory holding the storage files. `None` keeps everything in
    /// memory (tests, previews).
    pub data_dir: Option<PathBuf>,

    /// Key the list collection is stored under.
    /// Default: `"shoppingLists"`
    pub storage_key: String,

    /// Whether to start from the built-in seed lists when nothing is stored.
    /// Default: true
    pub seed_on_first_run: bool,

    /// Whether a failed save also queues a user notification. Failed saves
    /// are always logged.
    /// Default: false
    pub notify_on_save_failure: bool,
}

impl StoreConfig {
    /// Creates a configuration storing data under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: Some(data_dir.into()),
            ..Self::in_memory()
        }
    }

    /// Creates an in-memory configuration (for testing).
    pub fn in_memory() -> Self {
        StoreConfig {
            data_dir: None,
            storage_key: STORAGE_KEY.to_string(),
            seed_on_first_run: true,
            notify_on_save_failure: false,
        }
    }

    /// Sets the storage key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets whether seed lists are used on first run.
    pub fn seed_on_first_run(mut self, seed: bool) -> Self {
        self.seed_on_first_run = seed;
        self
    }

    /// Sets whether failed saves are surfaced as notifications.
    pub fn notify_on_save_failure(mut self, notify: bool) -> Self {
        self.notify_on_save_failure = notify;
        self
    }

    /// Builds the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BASKET_DATA_DIR`: data directory (default: platform data dir)
    /// - `BASKET_STORAGE_KEY`: storage key
    /// - `BASKET_NOTIFY_SAVE_FAILURES`: `1`/`true`/`yes` to notify on failed saves
    pub fn from_env() -> StorageResult<Self> {
        let data_dir = match std::env::var(ENV_DATA_DIR) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        let mut config = StoreConfig::new(data_dir);

        if let Ok(key) = std::env::var(ENV_STORAGE_KEY) {
            if !key.trim().is_empty() {
                config.storage_key = key;
            }
        }

        if let Ok(flag) = std::env::var(ENV_NOTIFY_SAVE_FAILURES) {
            config.notify_on_save_failure = parse_flag(&flag);
        }

        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Platform-specific application data directory.
pub fn default_data_dir() -> StorageResult<PathBuf> {
    let dirs = ProjectDirs::from("com", "basket", "lists").ok_or_else(|| {
        StorageError::Unavailable("could not determine app data directory".to_string())
    })?;
    Ok(dirs.data_dir().to_path_buf())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
