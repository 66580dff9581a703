//! Convolution primitives shared by the blur, sharpen and Roberts edge transforms.
//!
//! Pixels are processed as `f32` planes so intermediate responses (negative gradients,
//! values above 255) survive until the final [`saturate`]. Borders mirror without
//! repeating the edge pixel (`dcb|abcd|cba`).

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Round and clamp to the `u8` range.
pub fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Mirror an out-of-range index back into `0..len`.
pub fn reflect_101(i: i64, len: i64) -> i64 {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let m = i.rem_euclid(period);
    if m >= len {
        period - m
    } else {
        m
    }
}

/// Correlation kernel anchored at its center (`width / 2`, `height / 2`).
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn from_rows<const W: usize, const H: usize>(rows: [[f32; W]; H]) -> Self {
        Self {
            width: W,
            height: H,
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn scaled(mut self, factor: f32) -> Self {
        for w in &mut self.weights {
            *w *= factor;
        }
        self
    }
}

/// Single-channel `f32` image.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl Plane {
    pub fn from_gray(img: &GrayImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.pixels().map(|p| p[0] as f32).collect(),
        }
    }

    pub fn from_channel(img: &RgbImage, channel: usize) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.pixels().map(|p| p[channel] as f32).collect(),
        }
    }

    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([saturate(self.at(x, y))]))
    }

    pub fn at(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }

    /// Pixel at a possibly out-of-range coordinate, mirrored at the borders.
    pub fn reflected(&self, x: i64, y: i64) -> f32 {
        let x = reflect_101(x, self.width as i64);
        let y = reflect_101(y, self.height as i64);
        self.data[(y * self.width as i64 + x) as usize]
    }

    pub fn zip_map(&self, other: &Plane, f: impl Fn(f32, f32) -> f32) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    pub fn convolve(&self, kernel: &Kernel) -> Plane {
        let ax = (kernel.width / 2) as i64;
        let ay = (kernel.height / 2) as i64;
        let mut data = Vec::with_capacity(self.data.len());

        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let mut acc = 0.0f32;
                for ky in 0..kernel.height {
                    for kx in 0..kernel.width {
                        let w = kernel.weights[ky * kernel.width + kx];
                        if w != 0.0 {
                            acc += w * self.reflected(x + kx as i64 - ax, y + ky as i64 - ay);
                        }
                    }
                }
                data.push(acc);
            }
        }

        Plane {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Convolve with a separable kernel: `kx` along rows, then `ky` along columns.
    pub fn convolve_separable(&self, kx: &[f32], ky: &[f32]) -> Plane {
        let ax = (kx.len() / 2) as i64;
        let ay = (ky.len() / 2) as i64;
        let (w, h) = (self.width as i64, self.height as i64);

        let mut rows = Vec::with_capacity(self.data.len());
        for y in 0..h {
            for x in 0..w {
                let acc: f32 = kx
                    .iter()
                    .enumerate()
                    .map(|(i, k)| k * self.reflected(x + i as i64 - ax, y))
                    .sum();
                rows.push(acc);
            }
        }
        let rows = Plane {
            width: self.width,
            height: self.height,
            data: rows,
        };

        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..h {
            for x in 0..w {
                let acc: f32 = ky
                    .iter()
                    .enumerate()
                    .map(|(i, k)| k * rows.reflected(x, y + i as i64 - ay))
                    .sum();
                data.push(acc);
            }
        }

        Plane {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

pub fn split_rgb(img: &RgbImage) -> [Plane; 3] {
    [
        Plane::from_channel(img, 0),
        Plane::from_channel(img, 1),
        Plane::from_channel(img, 2),
    ]
}

pub fn merge_rgb(planes: &[Plane; 3]) -> RgbImage {
    let [r, g, b] = planes;
    RgbImage::from_fn(r.width, r.height, |x, y| {
        Rgb([saturate(r.at(x, y)), saturate(g.at(x, y)), saturate(b.at(x, y))])
    })
}

/// Apply `f` to each color plane independently.
pub fn per_channel(img: &RgbImage, f: impl Fn(&Plane) -> Plane) -> RgbImage {
    let planes = split_rgb(img).map(|p| f(&p));
    merge_rgb(&planes)
}
