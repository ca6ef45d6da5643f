//! JSON envelope handling
//!
//! Every API payload is nested under a named key, sometimes twice:
//! `{"server": {...}}`, `{"servers": {"server": [...]}}`,
//! `{"firewall_rules": {"firewall_rule": [...]}}`.

use crate::error::{Result, UpCloudError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Walk `keys` into `value` and deserialize what is found there.
pub fn unwrap<T: DeserializeOwned>(value: Value, keys: &[&str]) -> Result<T> {
    let mut current = value;
    for key in keys {
        current = match current {
            Value::Object(mut map) => map.remove(*key).ok_or_else(|| {
                UpCloudError::UnexpectedResponse(format!("missing `{}` in response", key))
            })?,
            other => {
                return Err(UpCloudError::UnexpectedResponse(format!(
                    "expected an object containing `{}`, got {}",
                    key,
                    kind(&other)
                )));
            }
        };
    }
    Ok(serde_json::from_value(current)?)
}

/// Like [`unwrap`] for list envelopes; a missing or null list is empty.
pub fn unwrap_list<T: DeserializeOwned>(value: Value, outer: &str, inner: &str) -> Result<Vec<T>> {
    let container = match value {
        Value::Object(mut map) => map.remove(outer),
        other => {
            return Err(UpCloudError::UnexpectedResponse(format!(
                "expected an object containing `{}`, got {}",
                outer,
                kind(&other)
            )));
        }
    };

    match container {
        None => Err(UpCloudError::UnexpectedResponse(format!(
            "missing `{}` in response",
            outer
        ))),
        Some(Value::Object(mut map)) => match map.remove(inner) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(list) => Ok(serde_json::from_value(list)?),
        },
        // An empty collection sometimes comes back as `"servers": []` or `""`
        Some(Value::Array(items)) if items.is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(UpCloudError::UnexpectedResponse(format!(
            "expected `{}` to be an object, got {}",
            outer,
            kind(&other)
        ))),
    }
}

/// Nest `payload` under `key`.
pub fn wrap<T: Serialize>(key: &str, payload: &T) -> Result<Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), serde_json::to_value(payload)?);
    Ok(Value::Object(map))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
