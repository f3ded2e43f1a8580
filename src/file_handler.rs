//! Decoding images into base layers and writing base layers back out.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Unsupported image format for {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats a base layer can be written to
const WRITABLE: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Bmp];

/// Decode an in-memory image into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, FileError> {
    let image = image::load_from_memory(bytes).map_err(FileError::Decode)?;
    log::debug!("Successfully decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

pub fn load_image(path: &Path) -> Result<RgbaImage, FileError> {
    log::info!("Processing image from path: {}", path.display());
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Write `pixels` to `path`, picking the encoder from the file extension.
///
/// JPEG has no alpha channel, so transparency is dropped for it.
pub fn save_image(pixels: &RgbaImage, path: &Path) -> Result<(), FileError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(|format| WRITABLE.contains(format))
        .ok_or_else(|| FileError::UnsupportedFormat(path.display().to_string()))?;

    let result = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(pixels.clone())
            .to_rgb8()
            .save_with_format(path, format),
        _ => pixels.save_with_format(path, format),
    };
    result.map_err(|err| match err {
        image::ImageError::IoError(io) => FileError::Io(io),
        other => FileError::Encode(other),
    })?;

    log::info!("Wrote {}x{} image to {}", pixels.width(), pixels.height(), path.display());
    Ok(())
}
