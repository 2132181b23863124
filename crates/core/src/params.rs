//! Helpers for reading typed engine parameters out of a JSON object.
//!
//! Missing keys and wrong types fall back to the caller's default, so a
//! partially specified params object always produces a usable configuration.
//! [`param_point`] is the one strict helper: a present but malformed point is
//! reported, since silently dropping a pointer position hides a caller bug.

use crate::error::EngineError;
use glam::DVec2;
use serde_json::Value;

/// Reads `params[name]` as `f64` (integers accepted), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a string, else `default`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Reads `params[name]` as an `[x, y]` pair.
///
/// Returns `Ok(None)` if the key is absent or null, and
/// `EngineError::ParamTypeMismatch` if it is present but not two numbers.
pub fn param_point(params: &Value, name: &str) -> Result<Option<DVec2>, EngineError> {
    let value = match params.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let mismatch = || EngineError::ParamTypeMismatch {
        name: name.to_owned(),
        expected: "[x, y]".to_owned(),
        got: json_type_name(value).to_owned(),
    };
    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => {
            let x = x.as_f64().ok_or_else(mismatch)?;
            let y = y.as_f64().ok_or_else(mismatch)?;
            Ok(Some(DVec2::new(x, y)))
        }
        _ => Err(mismatch()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
