//! Parameter schemas advertised for each operation.

use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Integer,
    Number,
    String,
    Boolean,
    StringArray,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::StringArray => "array",
        }
    }
}

/// One named parameter: its type, default and bounds or allowed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub default: Option<Value>,
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    pub allowed: Vec<&'static str>,
    pub required: bool,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            default: None,
            minimum: None,
            maximum: None,
            allowed: Vec::new(),
            required: false,
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn range(mut self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.minimum = Some(min.into());
        self.maximum = Some(max.into());
        self
    }

    pub fn minimum(mut self, min: impl Into<Value>) -> Self {
        self.minimum = Some(min.into());
        self
    }

    pub fn allowed(mut self, allowed: Vec<&'static str>) -> Self {
        self.allowed = allowed;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        prop.insert("description".into(), json!(self.description));
        if self.kind == ParamKind::StringArray {
            prop.insert("items".into(), json!({"type": "string"}));
            if let Some(min) = &self.minimum {
                prop.insert("minItems".into(), min.clone());
            }
        } else {
            if let Some(min) = &self.minimum {
                prop.insert("minimum".into(), min.clone());
            }
            if let Some(max) = &self.maximum {
                prop.insert("maximum".into(), max.clone());
            }
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        if !self.allowed.is_empty() {
            prop.insert("enum".into(), json!(self.allowed));
        }
        Value::Object(prop)
    }
}

/// Name, description and parameter list of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl OperationSpec {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn param_names(&self) -> Vec<&'static str> {
        self.params.iter().map(|p| p.name).collect()
    }

    /// JSON Schema of the argument object, as advertised in tool listings.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
