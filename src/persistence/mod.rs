//! Best-score persistence
//!
//! Stores are plain integer key-value maps keyed by [`Mode::storage_key`].
//! Failures are reported as [`StorageError`] and are never fatal: callers
//! keep the value in memory and carry on.
//!
//! [`Mode::storage_key`]: crate::mode::Mode::storage_key

use std::collections::HashMap;

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,

    #[error("storage rejected write for '{0}'")]
    Rejected(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Integer key-value store for best scores
pub trait BestScoreStore {
    /// Stored value, `None` when missing or unreadable
    fn load(&self, key: &str) -> Option<u32>;

    fn save(&mut self, key: &str, value: u32) -> Result<(), StorageError>;
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
    /// Number of successful `save` calls
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: u32) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}
