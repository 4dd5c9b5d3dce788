//! Browser localStorage key-value store (WASM only).

use super::KeyValueStore;
use crate::error::StorageError;

/// Key-value store backed by `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// Open the window's localStorage.
    pub fn open() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::backend("No window object available"))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::backend(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StorageError::backend("localStorage not available"))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::backend(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::backend(format!("Failed to save {}: {:?}", key, e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::backend(format!("Failed to remove {}: {:?}", key, e)))
    }
}
