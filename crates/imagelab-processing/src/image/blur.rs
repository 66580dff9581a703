//! Smoothing filters. Kernel sizes must be odd; an even size is bumped to the next odd one.

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::kernel::{per_channel, Plane};
use image::{GrayImage, RgbImage};

/// Largest accepted kernel size.
pub const MAX_KERNEL_SIZE: i64 = 255;

/// Validate a requested kernel size and make it odd.
pub fn odd_kernel_size(kernel_size: i64) -> ProcessingResult<u32> {
    if kernel_size <= 0 {
        return Err(ProcessingError::invalid_param(
            "kernel_size",
            format!("must be positive, got {}", kernel_size),
        ));
    }
    if kernel_size > MAX_KERNEL_SIZE {
        return Err(ProcessingError::invalid_param(
            "kernel_size",
            format!("must be at most {}, got {}", MAX_KERNEL_SIZE, kernel_size),
        ));
    }
    let k = if kernel_size % 2 == 0 {
        kernel_size + 1
    } else {
        kernel_size
    };
    Ok(k as u32)
}

/// Sigma implied by a kernel size when none is given.
pub fn sigma_for_size(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights.
pub fn gaussian_weights(size: u32, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 { sigma } else { sigma_for_size(size) };
    let center = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

pub fn gaussian_plane(plane: &Plane, size: u32, sigma: f32) -> Plane {
    let weights = gaussian_weights(size, sigma);
    plane.convolve_separable(&weights, &weights)
}

/// Gaussian blur with an explicit size and sigma (`sigma <= 0` derives it from size).
pub fn gaussian_with_sigma(img: &RgbImage, size: u32, sigma: f32) -> RgbImage {
    per_channel(img, |p| gaussian_plane(p, size, sigma))
}

pub fn gaussian_gray(img: &GrayImage, size: u32, sigma: f32) -> GrayImage {
    gaussian_plane(&Plane::from_gray(img), size, sigma).to_gray()
}

pub fn gaussian(img: &RgbImage, kernel_size: i64) -> ProcessingResult<RgbImage> {
    let k = odd_kernel_size(kernel_size)?;
    Ok(gaussian_with_sigma(img, k, 0.0))
}

pub fn median(img: &RgbImage, kernel_size: i64) -> ProcessingResult<RgbImage> {
    let k = odd_kernel_size(kernel_size)?;
    let radius = k / 2;
    Ok(imageproc::filter::median_filter(img, radius, radius))
}

/// Box blur: the unweighted mean of the `k x k` neighborhood.
pub fn average(img: &RgbImage, kernel_size: i64) -> ProcessingResult<RgbImage> {
    let k = odd_kernel_size(kernel_size)?;
    let weights = vec![1.0 / k as f32; k as usize];
    Ok(per_channel(img, |p| p.convolve_separable(&weights, &weights)))
}
