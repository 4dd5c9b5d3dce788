//! Directory-backed key-value store (native only).
//!
//! Each key is stored as `<dir>/<key>.json`.

use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StorageError;

/// Key-value store keeping one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        log::info!("Opened view storage at {:?}", dir);
        Ok(Self { dir })
    }

    /// Get the default storage directory.
    /// Uses the XDG data directory, falling back to the home directory.
    pub fn default_dir() -> Option<PathBuf> {
        if let Some(data_dir) = dirs::data_dir() {
            Some(data_dir.join("photoviews"))
        } else {
            dirs::home_dir().map(|home| home.join(".local").join("share").join("photoviews"))
        }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::backend(format!("Invalid storage key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write then rename so a crash never leaves a truncated record
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::trace!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{View, ViewId};
    use crate::storage::ViewStorage;

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut storage = ViewStorage::new(FileStore::open(dir.path()).unwrap());
        let view = View::new(ViewId(123));
        storage.save_view(&view).unwrap();
        storage.save_view_list(&[view.id]).unwrap();
        assert!(dir.path().join("view.123.json").exists());

        let reopened = ViewStorage::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.load_view_list().unwrap(), vec![ViewId(123)]);
        assert_eq!(reopened.load_view(ViewId(123)).unwrap(), Some(view));
    }

    #[test]
    fn test_missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("viewlist").unwrap(), None);
        store.remove("viewlist").unwrap();

        store.set("viewlist", "[]").unwrap();
        store.remove("viewlist").unwrap();
        assert_eq!(store.get("viewlist").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::Backend { .. })
        ));
    }
}
