//! Data models shared between the processing and API crates

mod image;

pub use image::*;
