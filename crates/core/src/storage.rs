//! Key-value persistence port.
//!
//! Client-owned state that must survive restarts (the compare list, the admin
//! token) goes through this port rather than touching a storage medium
//! directly, so the medium is swappable without touching store logic:
//! [`MemoryStore`] for tests, [`JsonFileStore`] for real processes, a browser
//! storage binding elsewhere.
//!
//! Values are serialized as JSON. Concurrent writers are not coordinated;
//! last write wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when loading or saving persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized or deserialized.
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage operations for small client-owned values.
///
/// Keys are flat strings (`"compareItems"`, `"adminToken"`). Implementations
/// must be thread-safe; callers treat every operation as best-effort
/// read-modify-write with last-write-wins semantics.
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium fails or the stored value does not
    /// deserialize into `T`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;

    /// Save `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the medium fails.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore> KeyValueStore for std::sync::Arc<T> {
    fn load<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, StorageError> {
        (**self).load(key)
    }

    fn save<V: Serialize>(&self, key: &str, value: &V) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore> KeyValueStore for &T {
    fn load<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, StorageError> {
        (**self).load(key)
    }

    fn save<V: Serialize>(&self, key: &str, value: &V) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store. Used by tests and as a no-persistence fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let values = self.values.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match values.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        let mut values = self.values.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        values.insert(key.to_owned(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// File-backed store keeping one pretty-printed JSON file per key.
///
/// The directory is created lazily on first save. Unknown or corrupt files
/// surface as [`StorageError::Json`]; callers that want localStorage-like
/// leniency treat that as "no value".
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path_for(key), raw)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "thuja".to_owned(),
            count: 4,
        };

        store.save("sample", &sample).unwrap();
        let loaded: Option<Sample> = store.load("sample").unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<Sample> = store.load("absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.save("k", &1_u32).unwrap();
        store.remove("k").unwrap();
        let loaded: Option<u32> = store.load("k").unwrap();
        assert!(loaded.is_none());
        // removing twice is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_memory_store_type_mismatch_is_error() {
        let store = MemoryStore::new();
        store.save("k", &"text").unwrap();
        let loaded: Result<Option<u32>, _> = store.load("k");
        assert!(matches!(loaded, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("sadok-storage-{}", std::process::id()));
        let store = JsonFileStore::new(&dir);
        let sample = Sample {
            name: "bonsai".to_owned(),
            count: 1,
        };

        store.save("sample", &sample).unwrap();
        let loaded: Option<Sample> = store.load("sample").unwrap();
        assert_eq!(loaded, Some(sample));

        store.remove("sample").unwrap();
        let loaded: Option<Sample> = store.load("sample").unwrap();
        assert!(loaded.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_store_missing_dir_is_none() {
        let store = JsonFileStore::new("/nonexistent-sadok-dir/state");
        let loaded: Option<Sample> = store.load("sample").unwrap();
        assert!(loaded.is_none());
    }
}
