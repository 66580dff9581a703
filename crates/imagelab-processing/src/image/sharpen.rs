//! Sharpening recipes

use crate::image::blur::{gaussian_plane, gaussian_with_sigma};
use crate::image::kernel::{merge_rgb, per_channel, split_rgb, Kernel};
use image::RgbImage;

pub const DEFAULT_KERNEL_STRENGTH: f64 = 1.0;
pub const DEFAULT_UNSHARP_STRENGTH: f64 = 1.5;
pub const DEFAULT_BOOST_FACTOR: f64 = 2.0;

/// Size and sigma of the blur subtracted by unsharp masking.
const UNSHARP_BLUR_SIZE: u32 = 9;
const UNSHARP_BLUR_SIGMA: f32 = 10.0;
/// Size of the blur used to isolate high frequencies for high-boost.
const HIGHBOOST_BLUR_SIZE: u32 = 5;

/// 4-neighbour Laplacian.
pub fn laplacian_kernel() -> Kernel {
    Kernel::from_rows([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])
}

/// Classic 3x3 high-pass kernel, scaled by `strength`.
pub fn kernel(img: &RgbImage, strength: f64) -> RgbImage {
    let k = Kernel::from_rows([
        [-1.0, -1.0, -1.0],
        [-1.0, 9.0, -1.0],
        [-1.0, -1.0, -1.0],
    ])
    .scaled(strength as f32);
    per_channel(img, |p| p.convolve(&k))
}

/// `img * (1 + s) - blurred * s`
pub fn unsharp(img: &RgbImage, strength: f64) -> RgbImage {
    let s = strength as f32;
    let blurred = split_rgb(&gaussian_with_sigma(img, UNSHARP_BLUR_SIZE, UNSHARP_BLUR_SIGMA));
    let original = split_rgb(img);
    let planes = [0, 1, 2].map(|c| original[c].zip_map(&blurred[c], |o, b| o * (1.0 + s) - b * s));
    merge_rgb(&planes)
}

/// `|img - laplacian(img)|`
pub fn laplacian(img: &RgbImage) -> RgbImage {
    let k = laplacian_kernel();
    per_channel(img, |p| p.zip_map(&p.convolve(&k), |o, l| (o - l).abs()))
}

/// `img + k * (img - blurred)`
pub fn highboost(img: &RgbImage, boost_factor: f64) -> RgbImage {
    let k = boost_factor as f32;
    per_channel(img, |p| {
        let blurred = gaussian_plane(p, HIGHBOOST_BLUR_SIZE, 0.0);
        p.zip_map(&blurred, |o, b| o + k * (o - b))
    })
}
