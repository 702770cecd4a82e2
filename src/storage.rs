use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Value under '{0}' kept changing, gave up after {1} attempts")]
    Contention(String, usize),
}

/// Key-value substrate the bookings are persisted in.
pub trait KeyValueStorage: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Writes `value` only if the stored value still equals `expected`
    /// (`None` meaning "no value"). Returns whether the write happened.
    ///
    /// The default is a plain read-check-write. Implementations that can do
    /// better should override it with an atomic version.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StorageError> {
        if self.get(key)?.as_deref() != expected {
            return Ok(false);
        }
        self.set(key, value)?;
        Ok(true)
    }
}
