//! Image normalization
//!
//! Uploaded documents are photos from phone cameras, routinely 4000 pixels
//! wide. Before anything leaves the process the image is decoded, scaled
//! down to fit a bounding box, and re-encoded as JPEG, which bounds both the
//! stored blob and the payload sent to the verifier.

use std::io::Cursor;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

use crate::error::NormalizeError;

/// Default bounding box for normalized documents
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality for re-encoded documents
const JPEG_QUALITY: u8 = 90;

/// A decoded, resized, re-encoded document image
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub width: u32,
    pub height: u32,
    /// JPEG bytes at quality 90
    pub jpeg_bytes: Vec<u8>,
}

impl NormalizedImage {
    /// The image as a `data:image/jpeg;base64,...` payload, the shape the
    /// verification endpoint accepts
    pub fn data_url(&self) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.jpeg_bytes)
        )
    }
}

/// Scales dimensions to fit a bounding box, preserving aspect ratio
///
/// Width is clamped first, then the resulting height; an extremely tall
/// image is therefore scaled twice. Rounding is half-up, with a floor of 1
/// pixel. Dimensions already inside the box pass through unchanged.
pub fn clamp_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (mut w, mut h) = (width as f64, height as f64);

    if w > max_width as f64 {
        h = (h * max_width as f64 / w).round().max(1.0);
        w = max_width as f64;
    }
    if h > max_height as f64 {
        w = (w * max_height as f64 / h).round().max(1.0);
        h = max_height as f64;
    }

    (w as u32, h as u32)
}

/// Decodes, resizes and re-encodes an uploaded image
///
/// # Errors
///
/// `NormalizeError::Decode` when the bytes are not a decodable image,
/// `NormalizeError::Encode` when JPEG re-encoding fails.
pub fn normalize(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<NormalizedImage, NormalizeError> {
    let decoded = image::load_from_memory(bytes).map_err(NormalizeError::Decode)?;
    let (width, height) = clamp_dimensions(decoded.width(), decoded.height(), max_width, max_height);

    debug!(
        from_width = decoded.width(),
        from_height = decoded.height(),
        width,
        height,
        "normalizing document image"
    );

    let resized = decoded
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgb8();

    let mut jpeg_bytes = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut jpeg_bytes), JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(NormalizeError::Encode)?;

    Ok(NormalizedImage {
        width,
        height,
        jpeg_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_wide_image() {
        assert_eq!(clamp_dimensions(4000, 2000, 1024, 1024), (1024, 512));
    }

    #[test]
    fn test_clamp_tall_image_is_clamped_twice() {
        // 1000x3000 first passes the width check, then the height scale
        // shrinks the width again
        assert_eq!(clamp_dimensions(1000, 3000, 1024, 1024), (341, 1024));
    }

    #[test]
    fn test_small_image_passes_through() {
        assert_eq!(clamp_dimensions(640, 480, 1024, 1024), (640, 480));
        assert_eq!(clamp_dimensions(1024, 1024, 1024, 1024), (1024, 1024));
    }

    #[test]
    fn test_normalize_resizes_and_reencodes() {
        let source = image::RgbImage::from_pixel(64, 32, image::Rgb([200, 30, 30]));
        let mut png = Vec::new();
        source
            .write_to(
                &mut Cursor::new(&mut png),
                image::ImageFormat::Png,
            )
            .unwrap();

        let normalized = normalize(&png, 1024, 1024).unwrap();
        assert_eq!((normalized.width, normalized.height), (64, 32));
        assert!(!normalized.jpeg_bytes.is_empty());
        // JPEG SOI marker
        assert_eq!(&normalized.jpeg_bytes[..2], &[0xFF, 0xD8]);
        assert!(normalized.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let result = normalize(b"definitely not an image", 1024, 1024);
        assert!(matches!(result, Err(NormalizeError::Decode(_))));
    }
}
