use crate::error::{ProcessingError, ProcessingResult};
use crate::image::blur::MAX_KERNEL_SIZE;
use crate::image::kernel::{reflect_101, saturate};
use image::{Rgb, RgbImage};

pub const DEFAULT_DIAMETER: i64 = 9;
pub const DEFAULT_SIGMA_COLOR: f64 = 75.0;
pub const DEFAULT_SIGMA_SPACE: f64 = 75.0;

/// Edge-preserving smoothing.
///
/// Each output pixel is a weighted mean over a circular window of diameter `d`.
/// Weights combine spatial distance (`sigma_space`) with the L1 color distance to the
/// center pixel (`sigma_color`), so strong edges keep their contrast. A non-positive
/// `d` derives the window from `sigma_space`; either way the window may not exceed
/// `MAX_KERNEL_SIZE`.
pub fn bilateral(
    img: &RgbImage,
    d: i64,
    sigma_color: f64,
    sigma_space: f64,
) -> ProcessingResult<RgbImage> {
    let sigma_color = if sigma_color > 0.0 { sigma_color } else { 1.0 };
    let sigma_space = if sigma_space > 0.0 { sigma_space } else { 1.0 };
    let radius = if d > 0 {
        d / 2
    } else {
        (sigma_space * 1.5).round() as i64
    }
    .max(1);

    if d > MAX_KERNEL_SIZE {
        return Err(ProcessingError::invalid_param(
            "d",
            format!("must be at most {}, got {}", MAX_KERNEL_SIZE, d),
        ));
    }
    if radius.saturating_mul(2).saturating_add(1) > MAX_KERNEL_SIZE {
        return Err(ProcessingError::invalid_param(
            "sigma_space",
            format!(
                "implies a window wider than {} when d is not positive",
                MAX_KERNEL_SIZE
            ),
        ));
    }

    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Ok(img.clone());
    }

    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f64;
            if r2.sqrt() > radius as f64 {
                continue;
            }
            offsets.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    // Color weights indexed by L1 distance, 0..=3*255.
    let color_weights: Vec<f64> = (0..=3 * 255)
        .map(|diff| ((diff * diff) as f64 * color_coeff).exp())
        .collect();

    Ok(RgbImage::from_fn(w, h, |x, y| {
        let center = img.get_pixel(x, y);
        let mut sum = [0.0f64; 3];
        let mut total = 0.0f64;

        for &(dx, dy, space_weight) in &offsets {
            let sx = reflect_101(x as i64 + dx, w as i64) as u32;
            let sy = reflect_101(y as i64 + dy, h as i64) as u32;
            let neighbor = img.get_pixel(sx, sy);
            let diff: usize = (0..3)
                .map(|c| (neighbor[c] as i32 - center[c] as i32).unsigned_abs() as usize)
                .sum();
            let weight = space_weight * color_weights[diff];
            for c in 0..3 {
                sum[c] += neighbor[c] as f64 * weight;
            }
            total += weight;
        }

        Rgb(sum.map(|s| saturate((s / total) as f32)))
    }))
}
