//! Geometric transforms

use crate::error::{ProcessingError, ProcessingResult};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

/// Largest width or height `resize` will produce.
pub const MAX_DIMENSION: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
    Both,
}

impl FlipDirection {
    pub fn parse(name: &str) -> ProcessingResult<Self> {
        match name {
            "horizontal" => Ok(FlipDirection::Horizontal),
            "vertical" => Ok(FlipDirection::Vertical),
            "both" => Ok(FlipDirection::Both),
            other => Err(ProcessingError::invalid_param(
                "direction",
                format!("unknown flip direction '{}'", other),
            )),
        }
    }
}

fn dimension(name: &str, value: i64) -> ProcessingResult<u32> {
    if value <= 0 || value > MAX_DIMENSION {
        return Err(ProcessingError::invalid_param(
            name,
            format!("must be between 1 and {}, got {}", MAX_DIMENSION, value),
        ));
    }
    Ok(value as u32)
}

/// Resize to exactly `width x height`; aspect ratio is not preserved.
pub fn resize(img: &RgbImage, width: i64, height: i64) -> ProcessingResult<RgbImage> {
    let width = dimension("width", width)?;
    let height = dimension("height", height)?;
    Ok(imageops::resize(img, width, height, FilterType::Triangle))
}

/// Rotate by `angle` degrees.
///
/// Multiples of 90 are lossless quarter turns clockwise and swap dimensions for 90/270.
/// Any other angle is an affine rotation counter-clockwise about the center on a canvas
/// of the original size; corners that leave the canvas are cropped and uncovered areas
/// are black.
pub fn rotate(img: &RgbImage, angle: i64) -> RgbImage {
    match angle.rem_euclid(360) {
        0 => img.clone(),
        90 => imageops::rotate90(img),
        180 => imageops::rotate180(img),
        270 => imageops::rotate270(img),
        other => rotate_about_center(
            img,
            -(other as f32).to_radians(),
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        ),
    }
}

pub fn flip(img: &RgbImage, direction: FlipDirection) -> RgbImage {
    match direction {
        FlipDirection::Horizontal => imageops::flip_horizontal(img),
        FlipDirection::Vertical => imageops::flip_vertical(img),
        FlipDirection::Both => imageops::rotate180(img),
    }
}
