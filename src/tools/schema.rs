use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// One property of a tool's input contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSchema {
    pub name: String,
    pub arg_type: String,
    pub description: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// What the host sees of a tool: everything except the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Map<String, Value>,
}

impl ToolSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        args: &[ArgSchema],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: input_schema(args),
        }
    }
}

/// Render argument schemas as a JSON-schema object.
pub fn input_schema(args: &[ArgSchema]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for arg in args {
        let mut property = Map::new();
        property.insert("type".into(), Value::String(arg.arg_type.clone()));
        property.insert("description".into(), Value::String(arg.description.clone()));
        if let Some(values) = &arg.enum_values {
            property.insert(
                "enum".into(),
                Value::Array(values.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(default) = &arg.default {
            property.insert("default".into(), default.clone());
        }
        properties.insert(arg.name.clone(), Value::Object(property));

        if arg.required {
            required.push(Value::String(arg.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    schema
}
