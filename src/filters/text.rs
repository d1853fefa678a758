//! Small string and sequence helpers plus YAML rendering

use crate::error::{ErrorCode, FilterError, Result};
use crate::value::{py_str, type_name};
use serde_json::Value;

/// Part of a file name before the first dot
pub fn filename(basename: &str) -> &str {
    basename.split('.').next().unwrap_or(basename)
}

/// Replace everything after the first dot with `ext`
pub fn with_ext(basename: &str, ext: &str) -> String {
    format!("{}.{}", filename(basename), ext)
}

/// First element of a sequence, or first character of a string
pub fn head(value: &Value) -> Result<Value> {
    let empty = || {
        FilterError::lookup_with_code(ErrorCode::LOOKUP_EMPTY_SEQUENCE, "0", "index out of range")
    };

    match value {
        Value::Array(items) => items.first().cloned().ok_or_else(empty),
        Value::String(text) => text
            .chars()
            .next()
            .map(|c| Value::String(c.to_string()))
            .ok_or_else(empty),
        other => Err(FilterError::type_error(format!(
            "head expects a sequence, got {}",
            type_name(other)
        ))),
    }
}

/// Everything after the first element; empty input stays empty
pub fn tail(value: &Value) -> Result<Value> {
    match value {
        Value::Array(items) => Ok(Value::Array(items.iter().skip(1).cloned().collect())),
        Value::String(text) => Ok(Value::String(text.chars().skip(1).collect())),
        other => Err(FilterError::type_error(format!(
            "tail expects a sequence, got {}",
            type_name(other)
        ))),
    }
}

/// Split `text` on every occurrence of `delimiter`
pub fn split_with(text: &str, delimiter: &str) -> Result<Vec<String>> {
    if delimiter.is_empty() {
        return Err(FilterError::value("empty separator"));
    }
    Ok(text.split(delimiter).map(str::to_string).collect())
}

/// Join the `str()` of each element with `delimiter`
pub fn join_with(items: &[Value], delimiter: &str) -> String {
    items.iter().map(py_str).collect::<Vec<_>>().join(delimiter)
}

/// Render a value as block-style YAML
pub fn to_safe_yaml(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
