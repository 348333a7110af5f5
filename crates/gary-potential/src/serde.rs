use std::collections::BTreeMap;
use std::iter::FromIterator;

use gary_core::errors::{ErrorInfo, GaryError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

fn format_error(code: &str, err: impl ToString) -> GaryError {
    GaryError::Format(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with sorted keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, GaryError> {
    let value = serde_json::to_value(value).map_err(|err| format_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical)
        .map_err(|err| format_error("json_serialize", err))?;
    Ok(bytes)
}

/// Serializes a value into pretty JSON with a trailing newline.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, GaryError> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|err| format_error("json_serialize", err))?;
    text.push('\n');
    Ok(text)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GaryError> {
    serde_json::from_slice(data).map_err(|err| format_error("json_deserialize", err))
}

/// Serializes a value into block-style YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, GaryError> {
    serde_yaml::to_string(value).map_err(|err| format_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GaryError> {
    serde_yaml::from_slice(data).map_err(|err| format_error("yaml_deserialize", err))
}
