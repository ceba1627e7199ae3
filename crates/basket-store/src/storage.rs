//! # Key-Value Storage
//!
//! Durable string storage addressed by key, the way browser local storage
//! works: one key, one serialized value.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStorage                                      │
//! │                                                                         │
//! │   ┌───────────────────────────┐     ┌───────────────────────────────┐  │
//! │   │ FileStorage               │     │ MemoryStorage                 │  │
//! │   │ <data_dir>/<key>.json     │     │ HashMap<String, String>       │  │
//! │   │ write tmp → rename        │     │ optional byte quota           │  │
//! │   └───────────────────────────┘     └───────────────────────────────┘  │
//! │                                                                         │
//! │  The rename makes each write all-or-nothing: a crash mid-save leaves   │
//! │  the previous value in place.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};

/// Durable key-value string storage.
pub trait KeyValueStorage: fmt::Debug {
    /// Returns the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Copies the stored value under `from` to `to` byte for byte, even when
    /// it isn't valid text. Returns false if `from` is absent.
    fn copy(&mut self, from: &str, to: &str) -> StorageResult<bool>;
}

/// Opens the backend selected by `config`.
pub fn open_storage(config: &StoreConfig) -> StorageResult<Box<dyn KeyValueStorage>> {
    match &config.data_dir {
        Some(dir) => Ok(Box::new(FileStorage::open(dir)?)),
        None => Ok(Box::new(MemoryStorage::new())),
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(dir.display().to_string(), e))?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;

        debug!(key, bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn copy(&mut self, from: &str, to: &str) -> StorageResult<bool> {
        let source = self.path_for(from)?;
        let target = self.path_for(to)?;
        let bytes = match fs::read(&source) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StorageError::io(from, e)),
        };

        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, &bytes).map_err(|e| StorageError::io(to, e))?;
        fs::rename(&tmp, &target).map_err(|e| StorageError::io(to, e))?;

        debug!(from, to, bytes = bytes.len(), "Copied storage file");
        Ok(true)
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage. Nothing survives the process; used for tests and
/// for hosts that opt out of durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// Maximum total bytes (keys + values), mimicking a browser quota.
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes pushing the total size over `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStorage {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Total bytes currently held.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn copy(&mut self, from: &str, to: &str) -> StorageResult<bool> {
        match self.entries.get(from).cloned() {
            Some(value) => self.set(to, &value).map(|()| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "[1,2]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1,2]"));

        storage.remove("k").unwrap();
        assert!(storage.is_empty());
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_memory_quota() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "12345").unwrap();
        // replacing counts only the new value
        storage.set("k", "123456789").unwrap();

        let err = storage.set("k", "1234567890").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 11,
                limit: 10
            }
        ));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("123456789"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path().join("nested")).unwrap();

        assert_eq!(storage.get("shoppingLists").unwrap(), None);
        storage.set("shoppingLists", "[]").unwrap();
        assert_eq!(storage.get("shoppingLists").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/shoppingLists.json").exists());
        assert!(!dir.path().join("nested/shoppingLists.json.tmp").exists());

        storage.remove("shoppingLists").unwrap();
        assert_eq!(storage.get("shoppingLists").unwrap(), None);
    }

    #[test]
    fn test_memory_copy_respects_quota() {
        let mut storage = MemoryStorage::with_quota(12);
        assert!(!storage.copy("a", "b").unwrap());

        storage.set("a", "123456").unwrap();
        assert!(matches!(
            storage.copy("a", "b"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(storage.get("b").unwrap(), None);

        storage.set("a", "12").unwrap();
        assert!(storage.copy("a", "b").unwrap());
        assert_eq!(storage.get("b").unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_file_copy_keeps_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        fs::write(dir.path().join("shoppingLists.json"), [b'[', 0xE9, b']']).unwrap();

        // the text view can't read it, the copy still can
        assert!(storage.get("shoppingLists").is_err());
        assert!(storage.copy("shoppingLists", "shoppingLists.corrupt").unwrap());
        assert_eq!(
            fs::read(dir.path().join("shoppingLists.corrupt.json")).unwrap(),
            vec![b'[', 0xE9, b']']
        );
        assert!(!storage.copy("missing", "elsewhere").unwrap());
        assert!(!dir.path().join("elsewhere.json").exists());
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert!(matches!(
            storage.get("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
        assert!(storage.get("shoppingLists.corrupt").is_ok());
    }

    #[test]
    fn test_open_storage_follows_config() {
        let storage = open_storage(&StoreConfig::in_memory()).unwrap();
        assert_eq!(storage.get("anything").unwrap(), None);

        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_storage(&StoreConfig::new(dir.path())).unwrap();
        storage.set("k", "v").unwrap();
        assert!(dir.path().join("k.json").exists());
    }
}
