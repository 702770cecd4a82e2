use crate::storage::{KeyValueStorage, StorageError};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// Durable storage keeping one `<key>.json` file per key inside a directory.
///
/// Writes go through a temporary file that is renamed over the target, so a
/// reader never observes a half written value. Compare and swap is atomic
/// between handles of the same process only.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        info!(directory = %directory.display(), "Using file storage");
        Ok(Self {
            directory,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!(?err, key, "Failed to read storage file");
                Err(err.into())
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut file = NamedTempFile::new_in(&self.directory)?;
        file.write_all(value.as_bytes())?;
        file.persist(self.path_for(key)).map_err(|err| {
            error!(?err, key, "Failed to persist storage file");
            StorageError::Io(err.error)
        })?;
        debug!(key, "Wrote storage file");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("File storage lock was poisoned".into()))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock()?;
        self.write(key, value)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StorageError> {
        let _guard = self.lock()?;
        if self.read(key)?.as_deref() != expected {
            return Ok(false);
        }
        self.write(key, value)?;
        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_reads_none() {
        let directory = tempdir().unwrap();
        let file_storage = FileStorage::new(directory.path()).unwrap();
        assert_eq!(file_storage.get("bookings").unwrap(), None);
    }

    #[test]
    fn test_creates_missing_directory() {
        let directory = tempdir().unwrap();
        let nested = directory.path().join("a").join("b");
        let file_storage = FileStorage::new(&nested).unwrap();
        file_storage.set("bookings", "[]").unwrap();
        assert!(nested.join("bookings.json").exists());
    }

    #[test]
    fn test_storage_persistency() {
        let directory = tempdir().unwrap();

        let file_storage = FileStorage::new(directory.path()).unwrap();
        file_storage
            .set("bookings", r#"[{"date":"2026-02-20","time":"14:00"}]"#)
            .unwrap();
        drop(file_storage);

        let file_storage = FileStorage::new(directory.path()).unwrap();
        assert_eq!(
            file_storage.get("bookings").unwrap().as_deref(),
            Some(r#"[{"date":"2026-02-20","time":"14:00"}]"#)
        );
    }

    #[test]
    fn test_compare_and_swap() {
        let directory = tempdir().unwrap();
        let file_storage = FileStorage::new(directory.path()).unwrap();

        assert!(file_storage.compare_and_swap("bookings", None, "a").unwrap());
        assert!(!file_storage.compare_and_swap("bookings", None, "b").unwrap());
        assert!(!file_storage
            .compare_and_swap("bookings", Some("b"), "c")
            .unwrap());
        assert!(file_storage
            .compare_and_swap("bookings", Some("a"), "c")
            .unwrap());
        assert_eq!(file_storage.get("bookings").unwrap().as_deref(), Some("c"));
    }
}
