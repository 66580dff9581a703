//! Presets: fixed sequences of registered operations.

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::dispatcher::Dispatcher;
use crate::image::params::OperationParams;
use image::RgbImage;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// One step of a preset: an operation name and its parameters as a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct PresetStep {
    pub operation: &'static str,
    pub params: fn() -> Value,
}

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub steps: &'static [PresetStep],
}

const fn step(operation: &'static str, params: fn() -> Value) -> PresetStep {
    PresetStep { operation, params }
}

fn no_params() -> Value {
    json!({})
}

pub static PRESETS: &[Preset] = &[
    Preset {
        name: "enhance_contrast",
        display_name: "Enhance Contrast",
        description: "Equalize the histogram, then sharpen",
        steps: &[
            step("histogram_eq", no_params),
            step("sharpen_kernel", || json!({"strength": 1.5})),
        ],
    },
    Preset {
        name: "edge_detection",
        display_name: "Edge Detection",
        description: "Grayscale, smooth, then Canny edges",
        steps: &[
            step("grayscale", no_params),
            step("blur_gaussian", || json!({"kernel_size": 5})),
            step("edge_canny", || json!({"low": 100, "high": 200})),
        ],
    },
    Preset {
        name: "denoise",
        display_name: "Denoise",
        description: "Edge-preserving bilateral smoothing",
        steps: &[step(
            "bilateral_filter",
            || json!({"d": 9, "sigma_color": 75, "sigma_space": 75}),
        )],
    },
    Preset {
        name: "black_white",
        display_name: "Black & White",
        description: "Grayscale, then adaptive threshold",
        steps: &[
            step("grayscale", no_params),
            step("threshold", || json!({"type": "adaptive"})),
        ],
    },
];

pub fn find_preset(name: &str) -> ProcessingResult<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ProcessingError::UnknownPreset(name.to_string()))
}

/// Run every step of `name` in order, feeding each result into the next.
/// The first failing step fails the whole preset.
pub fn apply_preset(
    dispatcher: &Dispatcher,
    img: &RgbImage,
    name: &str,
) -> ProcessingResult<RgbImage> {
    let preset = find_preset(name)?;
    let mut current = img.clone();
    for step in preset.steps {
        let params: OperationParams = match (step.params)() {
            Value::Object(map) => map,
            _ => OperationParams::new(),
        };
        current = dispatcher.apply(&current, step.operation, &params)?;
    }
    Ok(current)
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetStepInfo {
    pub operation: &'static str,
    pub params: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub operations: Vec<PresetStepInfo>,
}

/// Every preset keyed by its identifier.
pub fn list_presets() -> BTreeMap<&'static str, PresetInfo> {
    PRESETS
        .iter()
        .map(|preset| {
            let info = PresetInfo {
                name: preset.display_name,
                description: preset.description,
                operations: preset
                    .steps
                    .iter()
                    .map(|s| PresetStepInfo {
                        operation: s.operation,
                        params: (s.params)(),
                    })
                    .collect(),
            };
            (preset.name, info)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        RgbImage::from_fn(48, 48, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([220, 180, 40])
            } else {
                Rgb([20, 60, 140])
            }
        })
    }

    #[test]
    fn test_unknown_preset() {
        let err = apply_preset(&Dispatcher::new(), &sample(), "vintage").unwrap_err();
        assert!(matches!(err, ProcessingError::UnknownPreset(name) if name == "vintage"));
    }

    #[test]
    fn test_every_preset_step_is_a_registered_operation() {
        let dispatcher = Dispatcher::new();
        for preset in PRESETS {
            for step in preset.steps {
                assert!(dispatcher.find(step.operation).is_ok(), "{}", step.operation);
            }
        }
    }

    #[test]
    fn test_every_preset_runs() {
        let dispatcher = Dispatcher::new();
        for preset in PRESETS {
            let out = apply_preset(&dispatcher, &sample(), preset.name).unwrap();
            assert_eq!(out.dimensions(), (48, 48));
        }
    }

    #[test]
    fn test_black_white_is_binary_and_gray() {
        let out = apply_preset(&Dispatcher::new(), &sample(), "black_white").unwrap();
        assert!(out
            .pixels()
            .all(|p| p[0] == p[1] && p[1] == p[2] && (p[0] == 0 || p[0] == 255)));
    }

    #[test]
    fn test_list_presets() {
        let presets = list_presets();
        assert_eq!(presets.len(), 4);
        let edge = &presets["edge_detection"];
        assert_eq!(edge.name, "Edge Detection");
        assert_eq!(edge.operations.len(), 3);
        assert_eq!(edge.operations[2].params["high"], 200);
    }
}
