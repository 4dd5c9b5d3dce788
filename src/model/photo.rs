//! Photo data model.

use serde::{Deserialize, Serialize};

/// Orientation tag recorded when a photo is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall
    Landscape,
    /// Taller than wide, or square
    Portrait,
}

impl Orientation {
    /// Derive the orientation of an image from its pixel dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Get the display name for this orientation.
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

/// A single photo stored inline in its view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Image content as a data URL
    pub src: String,
    /// Orientation of the source image
    pub orientation: Orientation,
}

impl Photo {
    /// Create a photo from a data URL and orientation.
    pub fn new(src: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            src: src.into(),
            orientation,
        }
    }
}
