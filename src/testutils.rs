use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::storage::{KeyValueStorage, StorageError};

pub struct MockStorageInner {
    pub readable: AtomicBool,
    pub writable: AtomicBool,
    pub calls_to_get: AtomicU64,
    pub calls_to_set: AtomicU64,
    pub calls_to_compare_and_swap: AtomicU64,
    pub entries: Mutex<HashMap<String, String>>,
}

/// Mapping-backed storage that counts calls and can be told to fail.
#[derive(Clone)]
pub struct MockStorage(pub Arc<MockStorageInner>);

impl MockStorageInner {
    fn new() -> Self {
        Self {
            readable: AtomicBool::new(true),
            writable: AtomicBool::new(true),
            calls_to_get: AtomicU64::default(),
            calls_to_set: AtomicU64::default(),
            calls_to_compare_and_swap: AtomicU64::default(),
            entries: Mutex::default(),
        }
    }
}

impl MockStorage {
    pub fn new() -> Self {
        Self(Arc::new(MockStorageInner::new()))
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mock = Self::new();
        mock.0
            .entries
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
        mock
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.entries.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> u64 {
        self.0.calls_to_set.load(Ordering::SeqCst)
            + self.0.calls_to_compare_and_swap.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StorageError> {
        match flag.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StorageError::Unavailable("Supposed to fail".into())),
        }
    }
}

impl KeyValueStorage for MockStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.calls_to_get.fetch_add(1, Ordering::SeqCst);
        self.check(&self.0.readable)?;
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.calls_to_set.fetch_add(1, Ordering::SeqCst);
        self.check(&self.0.writable)?;
        self.0
            .entries
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
        Ok(())
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StorageError> {
        self.0
            .calls_to_compare_and_swap
            .fetch_add(1, Ordering::SeqCst);
        self.check(&self.0.writable)?;
        let mut entries = self.0.entries.lock().unwrap();
        if entries.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        entries.insert(key.into(), value.into());
        Ok(true)
    }
}
