//! Conversion from JSON documents into [`Value`]s.

use crate::value::{Array, Value};

/// Convert a JSON value. Objects become string-keyed arrays (numeric member
/// names become integer keys), integral numbers that fit `i64` become
/// integers, every other number a float.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::Array(Array::list(items.iter().map(from_json))),
        serde_json::Value::Object(members) => Value::Array(
            members
                .iter()
                .map(|(name, value)| (name.as_str(), from_json(value)))
                .collect(),
        ),
    }
}
