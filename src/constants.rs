//! Global constants for the photoviews application

/// Longest allowed edge of a stored photo, in pixels.
pub const MAX_IMAGE_SIZE: u32 = 1024;

/// Default JPEG quality used when encoding stored photos.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Thumbnail shown for views without photos.
pub const PLACEHOLDER_THUMBNAIL: &str = "nophotos.png";

/// MIME type of every stored photo.
pub const PHOTO_MIME_TYPE: &str = "image/jpeg";

/// File extensions accepted by the file pickers (lowercase, without dots).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"];

/// Storage key holding the ordered view index.
pub const VIEW_LIST_KEY: &str = "viewlist";

/// Prefix of storage keys holding individual views.
pub const VIEW_KEY_PREFIX: &str = "view.";

/// Check whether a file name has one of the accepted image extensions.
pub fn is_image_filename(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_filename_detection() {
        assert!(is_image_filename("holiday.JPG"));
        assert!(is_image_filename("scan.tif"));
        assert!(is_image_filename("a.b.png"));
        assert!(!is_image_filename("notes.txt"));
        assert!(!is_image_filename("jpeg"));
    }
}
