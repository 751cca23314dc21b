//! Image decoding for uploads and the CLI.
//!
//! Any format the `image` crate can sniff is accepted. Alpha is dropped
//! here, so everything downstream works on opaque RGB.

use brick_mosaic::Rgb;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::models::SourceImage;

/// Decode raw image bytes into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, ConvertError> {
    if bytes.is_empty() {
        return Err(ConvertError::ImageLoad("empty image data".to_string()));
    }

    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidDimension(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let pixels: Vec<Rgb> = rgb.pixels().map(|p| Rgb::from_bytes(p.0)).collect();

    tracing::debug!(width, height, bytes = bytes.len(), "Decoded image");

    Ok(SourceImage {
        width,
        height,
        pixels: Arc::new(pixels),
    })
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> Result<SourceImage, ConvertError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ConvertError::ImageLoad(format!("{}: {e}", path.display())))?;
    decode_image(&bytes)
}
