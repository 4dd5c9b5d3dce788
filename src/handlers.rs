//! Storage-level handlers for photoviews messages.
//!
//! Each handler performs the reads and writes for one kind of edit,
//! keeping the controller's update function about panels and selection.

use crate::error::StorageError;
use crate::model::{Photo, View, ViewId};
use crate::panel::{ItemEntry, ViewListEntry};
use crate::storage::{KeyValueStore, ViewStorage};

/// Create and persist an empty view, then append it to the index.
///
/// The id is the current time; it is bumped past any id already listed so
/// two views created within the same millisecond stay distinct.
pub fn add_view<S: KeyValueStore>(storage: &mut ViewStorage<S>) -> Result<ViewId, StorageError> {
    let mut list = storage.load_view_list()?;

    let mut id = ViewId::now();
    while list.contains(&id) {
        id = ViewId(id.0 + 1);
    }

    let view = View::new(id);
    storage.save_view(&view)?;
    list.push(id);
    storage.save_view_list(&list)?;

    log::debug!("➕ Created view {} ({})", id, view.name);
    Ok(id)
}

/// Remove a view from the index and delete its record.
///
/// Returns whether the id was listed. An unlisted id leaves the index alone.
pub fn remove_view<S: KeyValueStore>(
    storage: &mut ViewStorage<S>,
    id: ViewId,
) -> Result<bool, StorageError> {
    let mut list = storage.load_view_list()?;
    let listed = match list.iter().position(|&listed| listed == id) {
        Some(pos) => {
            list.remove(pos);
            storage.save_view_list(&list)?;
            true
        }
        None => false,
    };

    storage.remove_view(id)?;
    log::debug!("🗑️ Removed view {} (listed: {})", id, listed);
    Ok(listed)
}

/// Rename a view. Returns the stored name, or `None` if the view is gone.
pub fn rename_view<S: KeyValueStore>(
    storage: &mut ViewStorage<S>,
    id: ViewId,
    name: &str,
) -> Result<Option<String>, StorageError> {
    let Some(mut view) = storage.load_view(id)? else {
        return Ok(None);
    };

    view.name = name.to_string();
    storage.save_view(&view)?;
    log::debug!("✏️ Renamed view {} to {:?}", id, view.name);
    Ok(Some(view.name))
}

/// Remove the photo at `index` from a freshly loaded copy of the view.
///
/// Returns whether a photo was removed.
pub fn remove_item<S: KeyValueStore>(
    storage: &mut ViewStorage<S>,
    id: ViewId,
    index: usize,
) -> Result<bool, StorageError> {
    let Some(mut view) = storage.load_view(id)? else {
        return Ok(false);
    };

    if view.remove_photo(index).is_none() {
        return Ok(false);
    }

    storage.save_view(&view)?;
    log::debug!("🗑️ Removed item {} from view {}", index, id);
    Ok(true)
}

/// Append an ingested photo to a view. Returns `false` if the view is gone.
pub fn append_photo<S: KeyValueStore>(
    storage: &mut ViewStorage<S>,
    id: ViewId,
    photo: Photo,
) -> Result<bool, StorageError> {
    let Some(mut view) = storage.load_view(id)? else {
        return Ok(false);
    };

    view.photos.push(photo);
    storage.save_view(&view)?;
    log::debug!("📷 View {} now has {} photos", id, view.photos.len());
    Ok(true)
}

/// Build the main panel rows in index order.
///
/// Ids without a stored record are skipped.
pub fn view_list_entries<S: KeyValueStore>(
    storage: &ViewStorage<S>,
    placeholder: &str,
) -> Result<Vec<ViewListEntry>, StorageError> {
    let list = storage.load_view_list()?;
    let mut entries = Vec::with_capacity(list.len());

    for id in list {
        match storage.load_view(id)? {
            Some(view) => entries.push(ViewListEntry {
                id,
                thumbnail: view.thumbnail().unwrap_or(placeholder).to_string(),
                name: view.name,
            }),
            None => log::warn!("View {} is listed but has no record", id),
        }
    }

    Ok(entries)
}

/// Load the editor heading and item list of a view.
pub fn view_items<S: KeyValueStore>(
    storage: &ViewStorage<S>,
    id: ViewId,
) -> Result<Option<(String, Vec<ItemEntry>)>, StorageError> {
    let Some(view) = storage.load_view(id)? else {
        return Ok(None);
    };

    let items = view
        .photos
        .into_iter()
        .enumerate()
        .map(|(index, photo)| ItemEntry {
            index,
            src: photo.src,
            orientation: photo.orientation,
        })
        .collect();

    Ok(Some((view.name, items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;
    use crate::storage::MemoryStore;

    fn storage() -> ViewStorage<MemoryStore> {
        ViewStorage::new(MemoryStore::new())
    }

    fn photo(src: &str) -> Photo {
        Photo::new(src, Orientation::Landscape)
    }

    #[test]
    fn test_add_view_ids_are_unique() {
        let mut storage = storage();
        let ids: Vec<_> = (0..5).map(|_| add_view(&mut storage).unwrap()).collect();

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 5);
        assert_eq!(storage.load_view_list().unwrap(), ids);
    }

    #[test]
    fn test_remove_unlisted_view_is_noop() {
        let mut storage = storage();
        let kept = add_view(&mut storage).unwrap();

        assert!(!remove_view(&mut storage, ViewId(1)).unwrap());
        assert_eq!(storage.load_view_list().unwrap(), vec![kept]);
        assert!(storage.load_view(kept).unwrap().is_some());
    }

    #[test]
    fn test_remove_item_middle() {
        let mut storage = storage();
        let id = add_view(&mut storage).unwrap();
        for src in ["A", "B", "C"] {
            append_photo(&mut storage, id, photo(src)).unwrap();
        }

        assert!(remove_item(&mut storage, id, 1).unwrap());

        let srcs: Vec<_> = storage
            .load_view(id)
            .unwrap()
            .unwrap()
            .photos
            .into_iter()
            .map(|p| p.src)
            .collect();
        assert_eq!(srcs, ["A", "C"]);
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut storage = storage();
        let id = add_view(&mut storage).unwrap();
        append_photo(&mut storage, id, photo("A")).unwrap();

        assert!(!remove_item(&mut storage, id, 4).unwrap());
        assert!(!remove_item(&mut storage, ViewId(0), 0).unwrap());
        assert_eq!(storage.load_view(id).unwrap().unwrap().photos.len(), 1);
    }

    #[test]
    fn test_append_to_missing_view() {
        let mut storage = storage();
        assert!(!append_photo(&mut storage, ViewId(3), photo("A")).unwrap());
        assert!(storage.store().is_empty());
    }

    #[test]
    fn test_view_list_entries_use_first_photo_or_placeholder() {
        let mut storage = storage();
        let empty = add_view(&mut storage).unwrap();
        let full = add_view(&mut storage).unwrap();
        append_photo(&mut storage, full, photo("first")).unwrap();
        append_photo(&mut storage, full, photo("second")).unwrap();

        let entries = view_list_entries(&storage, "nophotos.png").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, empty);
        assert_eq!(entries[0].thumbnail, "nophotos.png");
        assert_eq!(entries[1].id, full);
        assert_eq!(entries[1].thumbnail, "first");
    }

    #[test]
    fn test_view_list_skips_dangling_ids() {
        let mut storage = storage();
        let id = add_view(&mut storage).unwrap();
        storage.save_view_list(&[ViewId(1), id]).unwrap();

        let entries = view_list_entries(&storage, "x").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
    }

    #[test]
    fn test_rename_view() {
        let mut storage = storage();
        let id = add_view(&mut storage).unwrap();

        assert_eq!(
            rename_view(&mut storage, id, "Summer").unwrap().as_deref(),
            Some("Summer")
        );
        assert_eq!(storage.load_view(id).unwrap().unwrap().name, "Summer");
        assert_eq!(rename_view(&mut storage, ViewId(2), "x").unwrap(), None);
    }
}
