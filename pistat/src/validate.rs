//! Frame validation: raw text -> typed [`Snapshot`].
//!
//! Decoding happens in two passes. The frame is first parsed as untyped JSON,
//! which separates "not JSON at all" from "JSON of the wrong shape". Each known
//! field is then decoded on its own so a schema error names the field (and the
//! array index) that broke it.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::FrameError;
use crate::types::Snapshot;

const PREVIEW_CHARS: usize = 80;

/// Validate one text frame.
pub fn parse_frame(raw: &str) -> Result<Snapshot, FrameError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| FrameError::MalformedEncoding {
        detail: e.to_string(),
        size: raw.len(),
        preview: raw.chars().take(PREVIEW_CHARS).collect(),
    })?;
    snapshot_from_value(&value)
}

/// Validate a binary frame. Producers only send text, but a binary frame that
/// happens to be UTF-8 is accepted.
pub fn parse_binary_frame(raw: &[u8]) -> Result<Snapshot, FrameError> {
    match std::str::from_utf8(raw) {
        Ok(s) => parse_frame(s),
        Err(e) => Err(FrameError::MalformedEncoding {
            detail: format!("binary frame is not UTF-8: {e}"),
            size: raw.len(),
            preview: String::from_utf8_lossy(&raw[..raw.len().min(PREVIEW_CHARS)]).into_owned(),
        }),
    }
}

pub fn snapshot_from_value(value: &Value) -> Result<Snapshot, FrameError> {
    let Value::Object(obj) = value else {
        return Err(FrameError::SchemaViolation {
            field: "$".into(),
            reason: format!("expected an object, found {}", type_name(value)),
        });
    };

    Ok(Snapshot {
        host: field(obj, "host")?,
        temp: field(obj, "temp")?,
        net_stats: list(obj, "net_stats")?,
        cpu_usage: list(obj, "cpu_usage")?,
        ram: field(obj, "ram")?,
        disk: list(obj, "disk")?,
        proc: list(obj, "proc")?,
    })
}

// null is read as "not sent this tick", same as a missing key
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Result<Option<T>, FrameError> {
    let Some(v) = present(obj, key) else {
        return Ok(None);
    };
    T::deserialize(v)
        .map(Some)
        .map_err(|e| FrameError::SchemaViolation {
            field: key.to_string(),
            reason: e.to_string(),
        })
}

fn list<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<T>>, FrameError> {
    let Some(v) = present(obj, key) else {
        return Ok(None);
    };
    let Value::Array(items) = v else {
        return Err(FrameError::SchemaViolation {
            field: key.to_string(),
            reason: format!("expected an array, found {}", type_name(v)),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            T::deserialize(item).map_err(|e| FrameError::SchemaViolation {
                field: format!("{key}[{i}]"),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()
        .map(Some)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
