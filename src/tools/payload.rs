//! Outbound request bodies.
//!
//! Strings are trimmed before they are sent. Optional fields are left out
//! entirely when absent or blank: the remote API treats an empty field
//! differently from a missing one.

use serde_json::{Map, Value};

/// Trim `value`; `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract the `data` member of a remote response envelope.
pub fn take_data(mut response: Value) -> Value {
    response
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null)
}

#[derive(Debug, Default, Clone)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always sent, trimmed.
    pub fn required(mut self, key: &str, value: String) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.trim().to_string()));
        self
    }

    /// Sent trimmed, only when non-blank.
    pub fn text(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(v) = non_blank(value) {
            self.fields.insert(key.to_string(), Value::String(v));
        }
        self
    }

    /// Sent only when present.
    pub fn value<T: Into<Value>>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.fields.insert(key.to_string(), v.into());
        }
        self
    }

    /// Sent only when it is an object with at least one key.
    pub fn object(mut self, key: &str, value: Option<Value>) -> Self {
        if let Some(Value::Object(map)) = value {
            if !map.is_empty() {
                self.fields.insert(key.to_string(), Value::Object(map));
            }
        }
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
