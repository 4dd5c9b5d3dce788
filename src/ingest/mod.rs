//! Image ingestion: turn selected image files into stored photos.
//!
//! A selected file is decoded, its long edge is constrained to
//! [`MAX_IMAGE_SIZE`](crate::constants::MAX_IMAGE_SIZE) pixels, and the result
//! is encoded as a JPEG data URL. Every file is an independent task; the
//! finished [`IngestEvent`]s reach the controller in completion order, which
//! is not the selection order.

#[cfg(not(target_arch = "wasm32"))]
mod native_pool;

#[cfg(not(target_arch = "wasm32"))]
pub use native_pool::IngestPool;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::constants::{DEFAULT_JPEG_QUALITY, MAX_IMAGE_SIZE, PHOTO_MIME_TYPE};
use crate::error::IngestError;
use crate::model::{Orientation, Photo};

/// Parameters of the rescale-and-encode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSettings {
    /// Longest allowed edge in pixels
    pub max_image_size: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_image_size: MAX_IMAGE_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// A finished ingestion task.
#[derive(Debug)]
pub struct IngestEvent {
    /// File name as reported by the picker
    pub name: String,
    /// The encoded photo, or why the file was rejected
    pub result: Result<Photo, IngestError>,
}

/// Scale factor that fits `width`x`height` inside a `max_dim` square without
/// ever enlarging.
pub fn rescale_factor(width: u32, height: u32, max_dim: u32) -> f64 {
    let max_dim = f64::from(max_dim);
    1.0_f64
        .min(max_dim / f64::from(width))
        .min(max_dim / f64::from(height))
}

/// Target dimensions after rescaling, truncated to whole pixels.
///
/// Never returns a zero dimension.
pub fn scaled_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let scale = rescale_factor(width, height, max_dim);
    let scaled_width = ((f64::from(width) * scale) as u32).max(1);
    let scaled_height = ((f64::from(height) * scale) as u32).max(1);
    (scaled_width, scaled_height)
}

/// Wrap encoded bytes as a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Decode an image file, rescale it and encode it as a JPEG photo.
pub fn ingest_image(data: &[u8], settings: &IngestSettings) -> Result<Photo, IngestError> {
    let img = image::load_from_memory(data).map_err(IngestError::Decode)?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(IngestError::EmptyImage { width, height });
    }

    let (target_width, target_height) =
        scaled_dimensions(width, height, settings.max_image_size);
    let img = if (target_width, target_height) == (width, height) {
        img
    } else {
        img.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, settings.jpeg_quality)
        .encode_image(&rgb)
        .map_err(IngestError::Encode)?;

    log::debug!(
        "Ingested {}x{} image as {}x{} JPEG ({} bytes)",
        width,
        height,
        target_width,
        target_height,
        encoded.len()
    );

    Ok(Photo::new(
        to_data_url(PHOTO_MIME_TYPE, &encoded),
        Orientation::from_dimensions(width, height),
    ))
}


#[cfg(test)]
mod tests {
    use super::test_util::png_bytes;
    use super::*;

    fn decode_data_url(src: &str) -> image::DynamicImage {
        let payload = src.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = BASE64.decode(payload).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn test_rescale_halves_wide_image() {
        assert_eq!(rescale_factor(2048, 1024, 1024), 0.5);
        assert_eq!(scaled_dimensions(2048, 1024, 1024), (1024, 512));
    }

    #[test]
    fn test_rescale_never_enlarges() {
        assert_eq!(rescale_factor(500, 500, 1024), 1.0);
        assert_eq!(scaled_dimensions(500, 500, 1024), (500, 500));
    }

    #[test]
    fn test_rescale_tall_image_truncates() {
        // 1001 * 0.5 = 500.5
        assert_eq!(scaled_dimensions(1001, 2048, 1024), (500, 1024));
    }

    #[test]
    fn test_rescale_keeps_one_pixel_minimum() {
        assert_eq!(scaled_dimensions(2048, 1, 1024), (1024, 1));
    }

    #[test]
    fn test_data_url_format() {
        assert_eq!(to_data_url("image/jpeg", b"hi"), "data:image/jpeg;base64,aGk=");
    }

    #[test]
    fn test_ingest_large_landscape() {
        let settings = IngestSettings {
            max_image_size: 64,
            ..IngestSettings::default()
        };
        let photo = ingest_image(&png_bytes(256, 128), &settings).unwrap();

        assert_eq!(photo.orientation, Orientation::Landscape);
        let decoded = decode_data_url(&photo.src);
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn test_ingest_small_portrait_unchanged() {
        let photo = ingest_image(&png_bytes(20, 30), &IngestSettings::default()).unwrap();

        assert_eq!(photo.orientation, Orientation::Portrait);
        let decoded = decode_data_url(&photo.src);
        assert_eq!((decoded.width(), decoded.height()), (20, 30));
    }

    #[test]
    fn test_ingest_rejects_garbage() {
        let result = ingest_image(b"definitely not an image", &IngestSettings::default());
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }
}
