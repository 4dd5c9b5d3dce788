//! Persistence of views and the view index.
//!
//! Views are stored as JSON records in a string-keyed [`KeyValueStore`]:
//!
//! - `view.<id>` holds one serialized [`View`]
//! - `viewlist` holds the ordered array of view ids
//!
//! [`ViewStorage`] is the facade the controller talks to. It does not keep the
//! index and the records consistent on its own; callers update both.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use crate::constants::VIEW_LIST_KEY;
use crate::error::StorageError;
use crate::model::{View, ViewId};

/// A durable string-keyed store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to views and the view index over a [`KeyValueStore`].
#[derive(Debug)]
pub struct ViewStorage<S> {
    store: S,
}

impl<S: KeyValueStore> ViewStorage<S> {
    /// Wrap a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load a view by id. Returns `Ok(None)` when no record exists.
    pub fn load_view(&self, id: ViewId) -> Result<Option<View>, StorageError> {
        match self.store.get(&id.storage_key())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Save a view under its own id.
    pub fn save_view(&mut self, view: &View) -> Result<(), StorageError> {
        let json = serde_json::to_string(view)?;
        self.store.set(&view.id.storage_key(), &json)
    }

    /// Delete the record of a view.
    pub fn remove_view(&mut self, id: ViewId) -> Result<(), StorageError> {
        self.store.remove(&id.storage_key())
    }

    /// Load the ordered view index. An absent index is empty.
    pub fn load_view_list(&self) -> Result<Vec<ViewId>, StorageError> {
        match self.store.get(VIEW_LIST_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the view index.
    pub fn save_view_list(&mut self, ids: &[ViewId]) -> Result<(), StorageError> {
        let json = serde_json::to_string(ids)?;
        self.store.set(VIEW_LIST_KEY, &json)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, Photo};

    fn storage() -> ViewStorage<MemoryStore> {
        ViewStorage::new(MemoryStore::new())
    }

    #[test]
    fn test_view_roundtrip() {
        let mut storage = storage();
        let mut view = View::new(ViewId(1_700_000_000_000));
        view.photos
            .push(Photo::new("data:image/jpeg;base64,AA==", Orientation::Landscape));

        storage.save_view(&view).unwrap();
        let loaded = storage.load_view(view.id).unwrap();

        assert_eq!(loaded, Some(view));
    }

    #[test]
    fn test_missing_view_is_none() {
        let storage = storage();
        assert!(storage.load_view(ViewId(5)).unwrap().is_none());
    }

    #[test]
    fn test_missing_view_list_is_empty() {
        let storage = storage();
        assert!(storage.load_view_list().unwrap().is_empty());
    }

    #[test]
    fn test_view_list_roundtrip_keeps_order() {
        let mut storage = storage();
        let ids = [ViewId(3), ViewId(1), ViewId(2)];
        storage.save_view_list(&ids).unwrap();

        assert_eq!(storage.load_view_list().unwrap(), ids);
        assert_eq!(storage.store().get("viewlist").unwrap().unwrap(), "[3,1,2]");
    }

    #[test]
    fn test_remove_view_deletes_record() {
        let mut storage = storage();
        let view = View::new(ViewId(9));
        storage.save_view(&view).unwrap();
        storage.remove_view(view.id).unwrap();

        assert!(storage.load_view(view.id).unwrap().is_none());
        // Removing again is fine
        storage.remove_view(view.id).unwrap();
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let mut store = MemoryStore::new();
        store.set("view.1", "{not json").unwrap();
        let storage = ViewStorage::new(store);

        assert!(matches!(
            storage.load_view(ViewId(1)),
            Err(StorageError::Json(_))
        ));
    }
}
