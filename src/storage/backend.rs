//! Key-value storage backends.

use std::cell::{
    Cell,
    RefCell,
};
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled or not exposed by the host (e.g. private browsing)
    #[error("Storage is not available: {0}")]
    Unavailable(String),
    /// A write was rejected because the storage is full
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
    /// Any other backend failure
    #[error("Storage operation failed: {0}")]
    Backend(String),
}

/// Browser-style string key-value storage.
///
/// Every operation may fail; callers decide how to degrade.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Operating mode of a [`MemoryStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BackendState {
    /// Normal operation
    #[default]
    Available,
    /// Every operation fails
    Disabled,
    /// Reads work, writes fail with a quota error
    Full,
}

/// In-memory storage.
///
/// Clones share the same entries, so a clone handed to a second page
/// context sees what the first one saved (like a reload).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Stored values
    entries: Rc<RefCell<HashMap<String, String>>>,
    /// Current failure simulation
    state: Rc<Cell<BackendState>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every operation.
    #[must_use]
    pub fn disabled() -> Self {
        let storage = Self::default();
        storage.disable();
        storage
    }

    /// Storage pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.entries.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn disable(&self) {
        self.state.set(BackendState::Disabled);
    }

    /// Makes every subsequent write fail with [`StorageError::QuotaExceeded`].
    pub fn fill(&self) {
        self.state.set(BackendState::Full);
    }

    /// Reads an entry regardless of the current mode.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Fails when the storage is disabled.
    fn check_readable(&self) -> Result<(), StorageError> {
        match self.state.get() {
            BackendState::Disabled => {
                Err(StorageError::Unavailable("storage is disabled".to_string()))
            }
            BackendState::Available | BackendState::Full => Ok(()),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_readable()?;
        Ok(self.peek(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_readable()?;
        if self.state.get() == BackendState::Full {
            return Err(StorageError::QuotaExceeded { key: key.to_string() });
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_readable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
