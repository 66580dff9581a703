//! Operation parameters
//!
//! Clients send parameters as loose JSON (`{"kernel_size": "5"}` and `{"kernel_size": 5}`
//! are both accepted). Each operation declares its parameters once as [`ParamSpec`]s;
//! [`ResolvedParams::resolve`] fills in declared defaults and coerces types before any
//! transform runs. Declared bounds are descriptive only and are not enforced here.

use crate::error::{ProcessingError, ProcessingResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw parameters as received from a client.
pub type OperationParams = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Int(i64),
    Float(f64),
    Choice(&'static str),
}

/// Declaration of one operation parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamDefault,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub options: &'static [&'static str],
}

impl ParamSpec {
    pub const fn int(name: &'static str, default: i64) -> Self {
        Self {
            name,
            default: ParamDefault::Int(default),
            min: None,
            max: None,
            step: None,
            options: &[],
        }
    }

    pub const fn float(name: &'static str, default: f64) -> Self {
        Self {
            name,
            default: ParamDefault::Float(default),
            min: None,
            max: None,
            step: None,
            options: &[],
        }
    }

    /// A choice among `options`; the first option is the default.
    pub const fn select(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            default: ParamDefault::Choice(options[0]),
            min: None,
            max: None,
            step: None,
            options,
        }
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub const fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn kind(&self) -> ParamKind {
        match self.default {
            ParamDefault::Int(_) => ParamKind::Int,
            ParamDefault::Float(_) => ParamKind::Float,
            ParamDefault::Choice(_) => ParamKind::Select,
        }
    }

    pub fn default_json(&self) -> Value {
        match self.default {
            ParamDefault::Int(v) => Value::from(v),
            ParamDefault::Float(v) => Value::from(v),
            ParamDefault::Choice(v) => Value::from(v),
        }
    }

    fn coerce(&self, raw: &Value) -> ProcessingResult<ParamValue> {
        let wrong_type = || {
            ProcessingError::invalid_param(
                self.name,
                format!("expected {:?}, got {}", self.kind(), raw),
            )
        };

        match self.default {
            ParamDefault::Int(_) => {
                let number = match raw {
                    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
                    Value::String(s) => {
                        let s = s.trim();
                        s.parse::<i64>()
                            .ok()
                            .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                    }
                    _ => None,
                };
                number.map(ParamValue::Int).ok_or_else(wrong_type)
            }
            ParamDefault::Float(_) => {
                let number = match raw {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                number
                    .filter(|f| f.is_finite())
                    .map(ParamValue::Float)
                    .ok_or_else(wrong_type)
            }
            ParamDefault::Choice(_) => {
                let choice = raw.as_str().ok_or_else(wrong_type)?.trim().to_lowercase();
                if !self.options.contains(&choice.as_str()) {
                    return Err(ProcessingError::invalid_param(
                        self.name,
                        format!("'{}' is not one of {:?}", choice, self.options),
                    ));
                }
                Ok(ParamValue::Choice(choice))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Choice(String),
}

/// Parameters after defaults and coercion, keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ResolvedParams {
    /// Resolve `raw` against `specs`. Missing or null keys take the declared default;
    /// undeclared keys are ignored.
    pub fn resolve(specs: &[ParamSpec], raw: &OperationParams) -> ProcessingResult<Self> {
        let mut values = BTreeMap::new();

        for spec in specs {
            let value = match raw.get(spec.name) {
                None | Some(Value::Null) => match spec.default {
                    ParamDefault::Int(v) => ParamValue::Int(v),
                    ParamDefault::Float(v) => ParamValue::Float(v),
                    ParamDefault::Choice(v) => ParamValue::Choice(v.to_string()),
                },
                Some(raw) => spec.coerce(raw)?,
            };
            values.insert(spec.name, value);
        }

        Ok(Self { values })
    }

    pub fn int(&self, name: &str) -> ProcessingResult<i64> {
        match self.values.get(name) {
            Some(ParamValue::Int(v)) => Ok(*v),
            _ => Err(ProcessingError::invalid_param(name, "not an integer parameter")),
        }
    }

    /// Float parameters also accept declared integers.
    pub fn float(&self, name: &str) -> ProcessingResult<f64> {
        match self.values.get(name) {
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            _ => Err(ProcessingError::invalid_param(name, "not a numeric parameter")),
        }
    }

    pub fn choice(&self, name: &str) -> ProcessingResult<&str> {
        match self.values.get(name) {
            Some(ParamValue::Choice(v)) => Ok(v.as_str()),
            _ => Err(ProcessingError::invalid_param(name, "not a select parameter")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::int("kernel_size", 5).range(3.0, 31.0).step(2.0),
        ParamSpec::float("strength", 1.5),
        ParamSpec::select("direction", &["horizontal", "vertical", "both"]),
    ];

    fn raw(value: Value) -> OperationParams {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let params = ResolvedParams::resolve(SPECS, &OperationParams::new()).unwrap();
        assert_eq!(params.int("kernel_size").unwrap(), 5);
        assert_eq!(params.float("strength").unwrap(), 1.5);
        assert_eq!(params.choice("direction").unwrap(), "horizontal");
    }

    #[test]
    fn test_null_takes_default() {
        let params = ResolvedParams::resolve(SPECS, &raw(json!({"kernel_size": null}))).unwrap();
        assert_eq!(params.int("kernel_size").unwrap(), 5);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let params = ResolvedParams::resolve(
            SPECS,
            &raw(json!({"kernel_size": "7", "strength": "2.5", "direction": "Vertical"})),
        )
        .unwrap();
        assert_eq!(params.int("kernel_size").unwrap(), 7);
        assert_eq!(params.float("strength").unwrap(), 2.5);
        assert_eq!(params.choice("direction").unwrap(), "vertical");
    }

    #[test]
    fn test_float_for_int_is_truncated() {
        let params = ResolvedParams::resolve(SPECS, &raw(json!({"kernel_size": 6.9}))).unwrap();
        assert_eq!(params.int("kernel_size").unwrap(), 6);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let params = ResolvedParams::resolve(SPECS, &raw(json!({"kernel_size": -3}))).unwrap();
        assert_eq!(params.int("kernel_size").unwrap(), -3);
    }

    #[test]
    fn test_wrong_type_is_invalid_parameter() {
        let err = ResolvedParams::resolve(SPECS, &raw(json!({"kernel_size": "large"}))).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidParameter { ref name, .. } if name == "kernel_size"));

        let err = ResolvedParams::resolve(SPECS, &raw(json!({"strength": true}))).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidParameter { .. }));
    }

    #[test]
    fn test_unknown_choice_is_invalid_parameter() {
        let err = ResolvedParams::resolve(SPECS, &raw(json!({"direction": "diagonal"}))).unwrap_err();
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn test_undeclared_keys_are_ignored() {
        let params = ResolvedParams::resolve(SPECS, &raw(json!({"unused": 1}))).unwrap();
        assert!(params.int("unused").is_err());
    }
}
