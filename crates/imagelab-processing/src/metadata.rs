//! Image metadata extraction
//!
//! Only headers are read: dimensions and pixel layout come from the decoder without
//! decoding pixel data, so listing a large gallery stays cheap.

use crate::error::{ProcessingError, ProcessingResult};
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use imagelab_core::ImageMetadata;
use std::io::Cursor;

/// Upper-case container name for a format, e.g. "PNG".
pub fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

/// Pixel layout name for a color type ("L", "LA", "RGB" or "RGBA").
pub fn mode_name(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 | ColorType::L16 => "L",
        ColorType::La8 | ColorType::La16 => "LA",
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA",
        _ => "RGB",
    }
}

/// Read width, height, format and mode from encoded bytes.
pub fn extract_metadata(data: &[u8]) -> ProcessingResult<ImageMetadata> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(image::ImageError::IoError(e)))?;

    let format = reader
        .format()
        .ok_or_else(|| ProcessingError::UnsupportedFormat("unrecognized image data".to_string()))?;

    let decoder = reader.into_decoder().map_err(ProcessingError::Decode)?;
    let (width, height) = decoder.dimensions();

    Ok(ImageMetadata {
        width,
        height,
        format: format_name(format),
        mode: mode_name(decoder.color_type()).to_string(),
        size_bytes: data.len() as u64,
    })
}
