//! Narrowing of a raw response body to a top-level JSON object.

use std::fmt::{self, Display};

use serde_json::{Map, Value};

use crate::error::FetchError;

/// The variant of a JSON value, used to say what was found instead of an
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        write!(f, "{label}")
    }
}

/// Parse `bytes` as JSON and require the top-level value to be an object.
pub fn decode_object(bytes: &[u8]) -> Result<Map<String, Value>, FetchError> {
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(FetchError::NotAnObject(JsonKind::of(&other))),
    }
}
