use crate::storage::{KeyValueStorage, StorageError};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, error};

/// In-memory storage. Clones share the same entries, like several tabs
/// sharing one browser profile.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl LocalStorage {
    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| {
            let err = "Local storage lock was poisoned";
            error!(err);
            StorageError::Unavailable(err.into())
        })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(key, "Write local storage");
        self.entries()?.insert(key.into(), value.into());
        Ok(())
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StorageError> {
        let mut entries = self.entries()?;
        if entries.get(key).map(String::as_str) != expected {
            debug!(key, "Compare and swap lost, value changed");
            return Ok(false);
        }
        entries.insert(key.into(), value.into());
        Ok(true)
    }
}
