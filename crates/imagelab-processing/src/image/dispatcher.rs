//! Operation dispatch
//!
//! Looks an operation up by name, resolves its parameters against the declared
//! defaults and runs the transform. Two channel conventions are exposed:
//! [`Dispatcher::run`] keeps single-channel results as they are (the file path), while
//! [`Dispatcher::apply`] always hands back RGB so results can be chained (previews
//! and presets).

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::color::expand_gray;
use crate::image::params::{OperationParams, ResolvedParams};
use crate::image::registry::{OperationSpec, OPERATIONS};
use image::{DynamicImage, RgbImage};
use imagelab_storage::sanitize_filename;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    operations: &'static [OperationSpec],
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            operations: OPERATIONS,
        }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> ProcessingResult<&'static OperationSpec> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| ProcessingError::UnknownOperation(name.to_string()))
    }

    /// Run `name`, returning whatever channel layout the transform produced.
    pub fn run(
        &self,
        img: &RgbImage,
        name: &str,
        params: &OperationParams,
    ) -> ProcessingResult<DynamicImage> {
        let op = self.find(name)?;
        let resolved = ResolvedParams::resolve(op.params, params)?;
        tracing::debug!(operation = name, ?resolved, "Running operation");
        (op.transform)(img, &resolved)
    }

    /// Run `name` and expand single-channel results to RGB.
    pub fn apply(
        &self,
        img: &RgbImage,
        name: &str,
        params: &OperationParams,
    ) -> ProcessingResult<RgbImage> {
        Ok(match self.run(img, name, params)? {
            DynamicImage::ImageRgb8(rgb) => rgb,
            DynamicImage::ImageLuma8(gray) => expand_gray(&gray),
            other => other.to_rgb8(),
        })
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Filename fragment describing the parameters that were explicitly requested.
///
/// Only keys present in `raw` contribute, so the same request always maps to the same
/// output name. Returns an empty string when nothing applies.
pub fn param_suffix(operation: &str, raw: &OperationParams) -> String {
    let get = |key: &str| raw.get(key).filter(|v| !v.is_null()).map(raw_text);
    let mut parts = Vec::new();

    match operation {
        "rotate" => parts.extend(get("angle").map(|a| format!("{}deg", a))),
        "flip" => parts.extend(get("direction")),
        "blur_gaussian" | "blur_median" | "blur_average" => {
            parts.extend(get("kernel_size").map(|k| format!("k{}", k)))
        }
        "threshold" => {
            parts.extend(get("threshold").map(|t| format!("t{}", t)));
            parts.extend(get("type"));
        }
        "resize" => {
            if let (Some(w), Some(h)) = (get("width"), get("height")) {
                parts.push(format!("{}x{}", w, h));
            }
        }
        "edge_canny" => {
            if let (Some(low), Some(high)) = (get("low"), get("high")) {
                parts.push(format!("l{}h{}", low, high));
            }
        }
        "extract_channel" => parts.extend(get("channel")),
        _ => {}
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("_{}", parts.join("_"))
    }
}

/// `{stem}_{operation}{suffix}{ext}` for a processed copy of `input`.
pub fn output_filename(
    input: &str,
    operation: &str,
    raw: &OperationParams,
) -> ProcessingResult<String> {
    let tag = format!("{}{}", operation, param_suffix(operation, raw));
    derived_filename(input, &tag)
}

/// `{stem}_{tag}{ext}`, reduced to a safe base name.
pub fn derived_filename(input: &str, tag: &str) -> ProcessingResult<String> {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProcessingError::InvalidFilename(input.to_string()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    sanitize_filename(&format!("{}_{}{}", stem, tag, ext))
        .ok_or_else(|| ProcessingError::InvalidFilename(input.to_string()))
}
