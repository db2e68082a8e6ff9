//! The persistence substrate behind the session store.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::errors::StorageError;

/// Durable string key-value storage, scoped to one device or browser
/// session. Methods take `&self`; backends handle their own locking.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Write entries in order. Backends that can should apply them
    /// atomically; the default stops at the first failure.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
    /// Returns true if the key existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// In-process storage. Used in tests and for request-scoped rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut FxHashMap<String, String>) -> R,
    ) -> Result<R, StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable {
            reason: "memory storage lock poisoned".to_string(),
        })?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_entries(|e| e.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_entries(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        self.with_entries(|e| {
            for (key, value) in entries {
                e.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.with_entries(|e| e.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.with_entries(|e| e.keys().cloned().collect())
    }
}
