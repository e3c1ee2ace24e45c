//! Browser LocalStorage store

use super::{BestScoreStore, StorageError};

/// Best scores kept as decimal strings in `window.localStorage`
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<u32> {
        let storage = Self::storage()?;
        let raw = storage.get_item(key).ok().flatten()?;
        raw.trim().parse().ok()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|_| StorageError::Rejected(key.to_string()))
    }
}
