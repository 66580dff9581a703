//! Operation registry
//!
//! The single table mapping operation names to their parameter declarations and
//! transforms. The catalog, the dispatcher and the presets all read from it, so an
//! operation exists everywhere or nowhere.

use crate::error::ProcessingResult;
use crate::image::color::{self, Channel};
use crate::image::geometry::{self, FlipDirection};
use crate::image::params::{ParamSpec, ResolvedParams};
use crate::image::threshold::{ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C};
use crate::image::{blur, denoise, edges, sharpen, threshold, tone};
use image::{DynamicImage, RgbImage};
use std::fmt;

/// A transform receives the source as RGB and may return a single-channel image.
pub type TransformFn = fn(&RgbImage, &ResolvedParams) -> ProcessingResult<DynamicImage>;

pub struct OperationSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub transform: TransformFn,
}

impl fmt::Debug for OperationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationSpec")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

const KERNEL_SIZE: ParamSpec = ParamSpec::int("kernel_size", 5).range(3.0, 31.0).step(2.0);

pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "grayscale",
        display_name: "Grayscale",
        description: "Convert the image to a single luma channel",
        params: &[],
        transform: op_grayscale,
    },
    OperationSpec {
        name: "threshold",
        display_name: "Threshold",
        description: "Binarize the image with a fixed or locally adaptive threshold",
        params: &[
            ParamSpec::int("threshold", 127).range(0.0, 255.0),
            ParamSpec::select("type", &["binary", "adaptive"]),
        ],
        transform: op_threshold,
    },
    OperationSpec {
        name: "blur_gaussian",
        display_name: "Gaussian Blur",
        description: "Smooth with a Gaussian kernel",
        params: &[KERNEL_SIZE],
        transform: op_blur_gaussian,
    },
    OperationSpec {
        name: "blur_median",
        display_name: "Median Blur",
        description: "Replace each pixel with the median of its neighborhood",
        params: &[KERNEL_SIZE],
        transform: op_blur_median,
    },
    OperationSpec {
        name: "blur_average",
        display_name: "Average Blur",
        description: "Replace each pixel with the mean of its neighborhood",
        params: &[KERNEL_SIZE],
        transform: op_blur_average,
    },
    OperationSpec {
        name: "sharpen_kernel",
        display_name: "Sharpen (Kernel)",
        description: "Sharpen with a 3x3 high-pass kernel",
        params: &[ParamSpec::float("strength", sharpen::DEFAULT_KERNEL_STRENGTH)],
        transform: op_sharpen_kernel,
    },
    OperationSpec {
        name: "sharpen_unsharp",
        display_name: "Unsharp Mask",
        description: "Sharpen by subtracting a blurred copy",
        params: &[
            ParamSpec::float("strength", sharpen::DEFAULT_UNSHARP_STRENGTH)
                .range(0.5, 3.0)
                .step(0.1),
        ],
        transform: op_sharpen_unsharp,
    },
    OperationSpec {
        name: "sharpen_laplacian",
        display_name: "Sharpen (Laplacian)",
        description: "Sharpen by subtracting the Laplacian",
        params: &[],
        transform: op_sharpen_laplacian,
    },
    OperationSpec {
        name: "sharpen_highboost",
        display_name: "High-Boost Filter",
        description: "Amplify high frequencies by a boost factor",
        params: &[
            ParamSpec::float("boost_factor", sharpen::DEFAULT_BOOST_FACTOR)
                .range(1.0, 5.0)
                .step(0.1),
        ],
        transform: op_sharpen_highboost,
    },
    OperationSpec {
        name: "edge_canny",
        display_name: "Canny Edge Detection",
        description: "Detect edges with hysteresis thresholds",
        params: &[
            ParamSpec::int("low", edges::DEFAULT_CANNY_LOW).range(0.0, 255.0),
            ParamSpec::int("high", edges::DEFAULT_CANNY_HIGH).range(0.0, 255.0),
        ],
        transform: op_edge_canny,
    },
    OperationSpec {
        name: "edge_roberts",
        display_name: "Roberts Edge Detection",
        description: "Gradient magnitude with 2x2 Roberts cross kernels",
        params: &[],
        transform: op_edge_roberts,
    },
    OperationSpec {
        name: "edge_sobel",
        display_name: "Sobel Edge Detection",
        description: "Gradient magnitude with 3x3 Sobel kernels",
        params: &[],
        transform: op_edge_sobel,
    },
    OperationSpec {
        name: "edge_prewitt",
        display_name: "Prewitt Edge Detection",
        description: "Gradient magnitude with 3x3 Prewitt kernels",
        params: &[],
        transform: op_edge_prewitt,
    },
    OperationSpec {
        name: "edge_laplacian",
        display_name: "Laplacian Edge Detection",
        description: "Absolute second-derivative response",
        params: &[],
        transform: op_edge_laplacian,
    },
    OperationSpec {
        name: "resize",
        display_name: "Resize",
        description: "Scale to an exact width and height",
        params: &[
            ParamSpec::int("width", 300).range(50.0, 2000.0),
            ParamSpec::int("height", 300).range(50.0, 2000.0),
        ],
        transform: op_resize,
    },
    OperationSpec {
        name: "rotate",
        display_name: "Rotate",
        description: "Rotate by an angle in degrees: quarter turns clockwise, other angles counter-clockwise",
        params: &[ParamSpec::int("angle", 90).range(-360.0, 360.0)],
        transform: op_rotate,
    },
    OperationSpec {
        name: "flip",
        display_name: "Flip",
        description: "Mirror horizontally, vertically or both",
        params: &[ParamSpec::select("direction", &["horizontal", "vertical", "both"])],
        transform: op_flip,
    },
    OperationSpec {
        name: "normalize",
        display_name: "Normalize",
        description: "Stretch the full intensity range to 0-255",
        params: &[],
        transform: op_normalize,
    },
    OperationSpec {
        name: "histogram_eq",
        display_name: "Histogram Equalization",
        description: "Equalize brightness while keeping colors",
        params: &[],
        transform: op_histogram_eq,
    },
    OperationSpec {
        name: "histogram_stretch",
        display_name: "Histogram Stretching",
        description: "Stretch each channel to its full range",
        params: &[],
        transform: op_histogram_stretch,
    },
    OperationSpec {
        name: "extract_channel",
        display_name: "Extract Channel",
        description: "Keep one color channel and zero the others",
        params: &[ParamSpec::select("channel", &["red", "green", "blue"])],
        transform: op_extract_channel,
    },
    OperationSpec {
        name: "contrast_brightness",
        display_name: "Contrast & Brightness",
        description: "Scale contrast and shift brightness",
        params: &[
            ParamSpec::float("contrast", 1.0).range(0.0, 3.0).step(0.1),
            ParamSpec::int("brightness", 0).range(-100.0, 100.0),
        ],
        transform: op_contrast_brightness,
    },
    OperationSpec {
        name: "bilateral_filter",
        display_name: "Bilateral Filter",
        description: "Edge-preserving noise reduction",
        params: &[
            ParamSpec::int("d", denoise::DEFAULT_DIAMETER).range(1.0, 25.0),
            ParamSpec::float("sigma_color", denoise::DEFAULT_SIGMA_COLOR).range(1.0, 200.0),
            ParamSpec::float("sigma_space", denoise::DEFAULT_SIGMA_SPACE).range(1.0, 200.0),
        ],
        transform: op_bilateral_filter,
    },
];

fn rgb(img: RgbImage) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageRgb8(img))
}

fn op_grayscale(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(color::grayscale(img)))
}

fn op_threshold(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    let gray = color::grayscale(img);
    let out = match p.choice("type")? {
        "adaptive" => threshold::adaptive_mean(&gray, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C),
        _ => threshold::binary(&gray, p.int("threshold")?),
    };
    Ok(DynamicImage::ImageLuma8(out))
}

fn op_blur_gaussian(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(blur::gaussian(img, p.int("kernel_size")?)?)
}

fn op_blur_median(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(blur::median(img, p.int("kernel_size")?)?)
}

fn op_blur_average(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(blur::average(img, p.int("kernel_size")?)?)
}

fn op_sharpen_kernel(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(sharpen::kernel(img, p.float("strength")?))
}

fn op_sharpen_unsharp(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(sharpen::unsharp(img, p.float("strength")?))
}

fn op_sharpen_laplacian(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(sharpen::laplacian(img))
}

fn op_sharpen_highboost(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(sharpen::highboost(img, p.float("boost_factor")?))
}

fn op_edge_canny(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    let gray = color::grayscale(img);
    let (low, high) = (p.float("low")?, p.float("high")?);
    Ok(DynamicImage::ImageLuma8(edges::canny(&gray, low, high)))
}

fn op_edge_roberts(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(edges::roberts(&color::grayscale(img))))
}

fn op_edge_sobel(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(edges::sobel(&color::grayscale(img))))
}

fn op_edge_prewitt(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(edges::prewitt(&color::grayscale(img))))
}

fn op_edge_laplacian(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(edges::laplacian(&color::grayscale(img))))
}

fn op_resize(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(geometry::resize(img, p.int("width")?, p.int("height")?)?)
}

fn op_rotate(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(geometry::rotate(img, p.int("angle")?))
}

fn op_flip(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    let direction = FlipDirection::parse(p.choice("direction")?)?;
    rgb(geometry::flip(img, direction))
}

fn op_normalize(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(tone::normalize(img))
}

fn op_histogram_eq(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(tone::equalize(img))
}

fn op_histogram_stretch(img: &RgbImage, _: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(tone::stretch(img))
}

fn op_extract_channel(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    let channel = Channel::parse(p.choice("channel")?)?;
    rgb(color::extract_channel(img, channel))
}

fn op_contrast_brightness(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(color::contrast_brightness(
        img,
        p.float("contrast")?,
        p.float("brightness")?,
    ))
}

fn op_bilateral_filter(img: &RgbImage, p: &ResolvedParams) -> ProcessingResult<DynamicImage> {
    rgb(denoise::bilateral(
        img,
        p.int("d")?,
        p.float("sigma_color")?,
        p.float("sigma_space")?,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::params::OperationParams;
    use image::Rgb;
    use std::collections::HashSet;

    #[test]
    fn test_operation_names_are_unique() {
        let names: HashSet<_> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
        assert_eq!(OPERATIONS.len(), 23);
    }

    #[test]
    fn test_every_operation_runs_with_defaults() {
        let img = RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 4) as u8, (y * 5) as u8, 90]));
        for op in OPERATIONS {
            let params = ResolvedParams::resolve(op.params, &OperationParams::new()).unwrap();
            let out = (op.transform)(&img, &params);
            assert!(out.is_ok(), "{} failed with defaults: {:?}", op.name, out.err());
        }
    }
}
