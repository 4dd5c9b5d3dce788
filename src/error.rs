//! Error types for storage and image ingestion.

use thiserror::Error;

/// Errors raised by the key-value storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error in a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be serialized or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage backend rejected the operation
    #[error("Storage backend error: {message}")]
    Backend {
        /// Description reported by the backend
        message: String,
    },
}

impl StorageError {
    /// Create a backend error with a message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Errors raised while turning a selected file into a stored photo.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The selected file could not be read
    #[error("Failed to read {name}: {source}")]
    Read {
        /// File name as reported by the picker
        name: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not a decodable image
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The rescaled image could not be encoded as JPEG
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The image reports a zero width or height
    #[error("Image has empty dimensions {width}x{height}")]
    EmptyImage {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },
}
