//! Client-facing description of the available operations.

use crate::image::params::{ParamKind, ParamSpec};
use crate::image::registry::OPERATIONS;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ParamSchema {
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
}

impl From<&ParamSpec> for ParamSchema {
    fn from(spec: &ParamSpec) -> Self {
        Self {
            kind: spec.kind(),
            default: spec.default_json(),
            min: spec.min,
            max: spec.max,
            step: spec.step,
            options: (!spec.options.is_empty()).then(|| spec.options.to_vec()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: BTreeMap<&'static str, ParamSchema>,
}

/// Every registered operation keyed by its identifier. `name` carries the display name.
pub fn list_operations() -> BTreeMap<&'static str, OperationInfo> {
    OPERATIONS
        .iter()
        .map(|op| {
            let info = OperationInfo {
                name: op.display_name,
                description: op.description,
                parameters: op
                    .params
                    .iter()
                    .map(|spec| (spec.name, ParamSchema::from(spec)))
                    .collect(),
            };
            (op.name, info)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_lists_every_registered_operation() {
        let catalog = list_operations();
        assert_eq!(catalog.len(), OPERATIONS.len());
        for op in OPERATIONS {
            assert!(catalog.contains_key(op.name));
        }
    }

    #[test]
    fn test_blur_schema() {
        let catalog = list_operations();
        let schema = serde_json::to_value(&catalog["blur_gaussian"].parameters["kernel_size"]).unwrap();
        assert_eq!(
            schema,
            json!({"type": "int", "default": 5, "min": 3.0, "max": 31.0, "step": 2.0})
        );
    }

    #[test]
    fn test_select_schema_lists_options() {
        let catalog = list_operations();
        let schema = serde_json::to_value(&catalog["flip"].parameters["direction"]).unwrap();
        assert_eq!(schema["type"], "select");
        assert_eq!(schema["default"], "horizontal");
        assert_eq!(schema["options"], json!(["horizontal", "vertical", "both"]));
        assert!(schema.get("min").is_none());
    }

    #[test]
    fn test_parameterless_operation_has_empty_map() {
        let catalog = list_operations();
        assert_eq!(catalog["grayscale"].name, "Grayscale");
        assert!(catalog["grayscale"].parameters.is_empty());
    }
}
