//! View (album) data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use super::Photo;

/// Identifier of a view: its creation time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl ViewId {
    /// Id for a view created right now.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Storage key of the view record with this id.
    pub fn storage_key(&self) -> String {
        format!("{}{}", crate::constants::VIEW_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ViewId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ViewId)
    }
}

/// A named album of photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Unique identifier (creation timestamp)
    pub id: ViewId,
    /// Display name
    pub name: String,
    /// Photos in insertion order
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl View {
    /// Create an empty view named after its creation time.
    pub fn new(id: ViewId) -> Self {
        Self {
            id,
            name: placeholder_name(id),
            photos: Vec::new(),
        }
    }

    /// Source of the first photo, used as the view's thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.photos.first().map(|p| p.src.as_str())
    }

    /// Remove the photo at `index`. Returns the removed photo, or `None` when
    /// the index is out of range.
    pub fn remove_photo(&mut self, index: usize) -> Option<Photo> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }
}

/// Default name for a freshly created view: its creation date as text.
fn placeholder_name(id: ViewId) -> String {
    i64::try_from(id.0)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%a %b %d %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("View {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;

    #[test]
    fn test_new_view_is_empty_and_named() {
        let view = View::new(ViewId(1_700_000_000_000));
        assert!(view.photos.is_empty());
        assert_eq!(view.name, "Tue Nov 14 2023 22:13:20 UTC");
        assert_eq!(view.thumbnail(), None);
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(ViewId(42).storage_key(), "view.42");
    }

    #[test]
    fn test_view_json_matches_stored_shape() {
        let json = r#"{"id":17,"name":"Trip","photos":[{"src":"data:x","orientation":"portrait"}]}"#;
        let view: View = serde_json::from_str(json).unwrap();
        assert_eq!(view.id, ViewId(17));
        assert_eq!(view.photos[0].orientation, Orientation::Portrait);
        assert_eq!(serde_json::to_string(&view).unwrap(), json);
    }

    #[test]
    fn test_remove_photo_out_of_range() {
        let mut view = View::new(ViewId(1));
        view.photos.push(Photo::new("a", Orientation::Portrait));
        assert!(view.remove_photo(3).is_none());
        assert_eq!(view.photos.len(), 1);
        assert_eq!(view.remove_photo(0).map(|p| p.src), Some("a".to_string()));
    }

    #[test]
    fn test_parse_view_id() {
        assert_eq!(" 123 ".parse::<ViewId>().unwrap(), ViewId(123));
        assert!("abc".parse::<ViewId>().is_err());
    }
}
