use crate::error::{ProcessingError, ProcessingResult};
use crate::image::color::grayscale;
use image::{DynamicImage, Pixel, Rgb, RgbImage};
use serde::Serialize;
use std::collections::BTreeMap;

const BINS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramChannel {
    All,
    Gray,
    Red,
    Green,
    Blue,
}

impl HistogramChannel {
    pub fn parse(name: &str) -> ProcessingResult<Self> {
        match name {
            "all" => Ok(Self::All),
            "gray" => Ok(Self::Gray),
            "r" => Ok(Self::Red),
            "g" => Ok(Self::Green),
            "b" => Ok(Self::Blue),
            other => Err(ProcessingError::invalid_param(
                "channel",
                format!("expected one of all, gray, r, g, b; got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramReport {
    /// 256 raw pixel counts per requested channel, keyed `r`/`g`/`b`/`gray`.
    pub histogram: BTreeMap<&'static str, Vec<u64>>,
    pub width: u32,
    pub height: u32,
    /// Channels of the buffer that was counted. Sources are always counted as RGB.
    pub channels: u8,
}

fn channel_counts(img: &RgbImage, channel: usize) -> Vec<u64> {
    let mut counts = vec![0u64; BINS];
    for pixel in img.pixels() {
        counts[pixel[channel] as usize] += 1;
    }
    counts
}

pub fn generate(img: &DynamicImage, channel: HistogramChannel) -> HistogramReport {
    let rgb = img.to_rgb8();
    let mut histogram = BTreeMap::new();

    match channel {
        HistogramChannel::Gray => {
            let mut counts = vec![0u64; BINS];
            for pixel in grayscale(&rgb).pixels() {
                counts[pixel[0] as usize] += 1;
            }
            histogram.insert("gray", counts);
        }
        HistogramChannel::All => {
            for (key, index) in [("r", 0), ("g", 1), ("b", 2)] {
                histogram.insert(key, channel_counts(&rgb, index));
            }
        }
        HistogramChannel::Red => {
            histogram.insert("r", channel_counts(&rgb, 0));
        }
        HistogramChannel::Green => {
            histogram.insert("g", channel_counts(&rgb, 1));
        }
        HistogramChannel::Blue => {
            histogram.insert("b", channel_counts(&rgb, 2));
        }
    }

    HistogramReport {
        histogram,
        width: rgb.width(),
        height: rgb.height(),
        channels: Rgb::<u8>::CHANNEL_COUNT,
    }
}
