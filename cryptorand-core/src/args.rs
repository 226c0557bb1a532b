//! Schema-driven extraction of loosely typed call arguments.
//!
//! Callers send a JSON object. Each operation pulls typed fields out of it
//! through [`Arguments`]; a missing or `null` field takes the default, a
//! field of the wrong JSON type is rejected. Nothing is coerced: `"5"` is not
//! an integer and `5.0` is not an integer either.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// A string-valued enumeration accepted as an argument.
pub trait Choice: Copy + PartialEq + 'static {
    /// Wire spelling of every variant, in schema order.
    const VARIANTS: &'static [(&'static str, Self)];

    fn as_str(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, v)| *v == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }

    fn allowed() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|(name, _)| *name).collect()
    }

    fn parse(s: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, v)| *v)
    }
}

/// Read-only view over a call's argument object.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Fails on the first argument name not in `known`.
    pub fn reject_unknown(&self, known: &[&str]) -> Result<(), ValidationError> {
        match self.map.keys().find(|k| !known.contains(&k.as_str())) {
            Some(unknown) => Err(ValidationError::new(
                unknown.as_str(),
                format!("Unknown argument '{unknown}'"),
                format!("one of [{}]", known.join(", ")),
            )),
            None => Ok(()),
        }
    }

    pub fn integer(&self, field: &str, default: i64) -> Result<i64, ValidationError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else if n.is_u64() {
                    Err(ValidationError::new(
                        field,
                        format!("{} is outside the 64-bit signed integer range", label(field)),
                        "64-bit signed integer",
                    ))
                } else {
                    Err(ValidationError::new(
                        field,
                        format!("{} must be an integer, got {n}", label(field)),
                        "integer",
                    ))
                }
            }
            other => Err(type_mismatch(field, "an integer", other)),
        }
    }

    pub fn number(&self, field: &str, default: f64) -> Result<f64, ValidationError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => Ok(f),
                _ => Err(ValidationError::new(
                    field,
                    format!("{} must be a finite number", label(field)),
                    "finite number",
                )),
            },
            other => Err(type_mismatch(field, "a number", other)),
        }
    }

    pub fn boolean(&self, field: &str, default: bool) -> Result<bool, ValidationError> {
        match self.get(field) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(type_mismatch(field, "a boolean", other)),
        }
    }

    pub fn choice<T: Choice>(&self, field: &str, default: T) -> Result<T, ValidationError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };
        let s = match value {
            Value::String(s) => s,
            other => return Err(type_mismatch(field, "a string", other)),
        };
        T::parse(s).ok_or_else(|| {
            let allowed = T::allowed().join(", ");
            ValidationError::new(
                field,
                format!("{} must be one of: {allowed} (got '{s}')", label(field)),
                format!("one of [{allowed}]"),
            )
        })
    }

    /// A required array of strings. Emptiness is left to the caller.
    pub fn string_list(&self, field: &str) -> Result<Vec<String>, ValidationError> {
        let items = match self.get(field) {
            None => {
                return Err(ValidationError::new(
                    field,
                    format!("{} is required", label(field)),
                    "required",
                ))
            }
            Some(Value::Array(items)) => items,
            Some(other) => return Err(type_mismatch(field, "an array of strings", other)),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ValidationError::new(
                    field,
                    format!(
                        "{} must contain only strings, item {i} is {}",
                        label(field),
                        json_type(other)
                    ),
                    "array of strings",
                )),
            })
            .collect()
    }
}

/// Inclusive range check producing the canonical "X must be between" error.
pub fn check_range(field: &str, value: i64, lo: i64, hi: i64) -> Result<(), ValidationError> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{} must be between {lo} and {hi}", label(field)),
            format!("{lo} <= {field} <= {hi}"),
        ))
    }
}

/// Field name with its first letter upper-cased, for error messages.
pub(crate) fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

fn type_mismatch(field: &str, expected: &str, got: &Value) -> ValidationError {
    ValidationError::new(
        field,
        format!("{} must be {expected}, got {}", label(field), json_type(got)),
        expected.trim_start_matches("a ").trim_start_matches("an ").to_string(),
    )
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
