use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value under '{0}' is corrupt or has the wrong type")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value persistence the cache and feedback recorder are built on.
///
/// Each call must be atomic on its own: a `set` is observed either fully or
/// not at all.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Missing keys read as an empty set
    fn string_set(&self, key: &str) -> Result<HashSet<String>, StoreError>;

    fn set_string_set(&self, key: &str, values: &HashSet<String>) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn string_set(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        (**self).string_set(key)
    }

    fn set_string_set(&self, key: &str, values: &HashSet<String>) -> Result<(), StoreError> {
        (**self).set_string_set(key, values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum StoredValue {
    Bytes(Vec<u8>),
    StringSet(HashSet<String>),
}

impl StoredValue {
    fn as_bytes(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        match self {
            StoredValue::Bytes(bytes) => Ok(bytes.clone()),
            StoredValue::StringSet(_) => Err(StoreError::Corrupt(key.to_string())),
        }
    }

    fn as_string_set(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        match self {
            StoredValue::StringSet(values) => Ok(values.clone()),
            StoredValue::Bytes(_) => Err(StoreError::Corrupt(key.to_string())),
        }
    }
}

/// In-memory store, for tests and for hosts that do not persist
#[derive(Default)]
pub struct MemoryStore {
    values: DashMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.values
            .get(key)
            .map(|value| value.as_bytes(key))
            .transpose()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.values
            .insert(key.to_string(), StoredValue::Bytes(value.to_vec()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }

    fn string_set(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        match self.values.get(key) {
            Some(value) => value.as_string_set(key),
            None => Ok(HashSet::new()),
        }
    }

    fn set_string_set(&self, key: &str, values: &HashSet<String>) -> Result<(), StoreError> {
        self.values
            .insert(key.to_string(), StoredValue::StringSet(values.clone()));
        Ok(())
    }
}

/// Store persisted as a single JSON document.
///
/// Every write rewrites the file through a temporary sibling and a rename.
/// If persisting fails the in-memory view is left as it was.
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, StoredValue>>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("Opened store at {} with {} keys", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, StoredValue>),
    {
        let mut values = self.values.lock();
        let mut updated = values.clone();
        change(&mut updated);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, StoredValue>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(values)?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.values
            .lock()
            .get(key)
            .map(|value| value.as_bytes(key))
            .transpose()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.update(|values| {
            values.insert(key.to_string(), StoredValue::Bytes(value.to_vec()));
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.remove(key);
        })
    }

    fn string_set(&self, key: &str) -> Result<HashSet<String>, StoreError> {
        match self.values.lock().get(key) {
            Some(value) => value.as_string_set(key),
            None => Ok(HashSet::new()),
        }
    }

    fn set_string_set(&self, key: &str, values: &HashSet<String>) -> Result<(), StoreError> {
        self.update(|stored| {
            stored.insert(key.to_string(), StoredValue::StringSet(values.clone()));
        })
    }
}
