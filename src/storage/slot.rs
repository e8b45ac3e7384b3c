//! String-keyed durable slots.

use std::collections::HashMap;
use thiserror::Error;

/// A string-keyed store of string values.
///
/// Writing a key replaces its previous value. Removing a missing key is not an error.
pub trait KeyValueSlot {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Erase `key`.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Slot kept in process memory. Contents are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}
