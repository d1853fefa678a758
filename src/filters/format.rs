//! String templating over values and records
//!
//! `format_value` applies a single-placeholder pattern to a scalar, or walks a
//! record alongside a parallel mapping of per-key patterns. A pattern with no
//! room for the value is returned verbatim, which lets a pattern mapping mix
//! literal replacements with real patterns.

use super::printf;
use super::reshape::{attributes, merge};
use crate::error::Result;
use crate::value::{py_str, Record, Shape};
use serde_json::Value;
use tracing::trace;

/// Pattern used for keys that have no entry in a pattern mapping
pub const PASS_THROUGH: &str = "%s";

/// Format `value` with `pattern`
///
/// - mapping value + mapping pattern: each key is formatted with its own
///   pattern, defaulting to `"%s"`
/// - otherwise `pattern` is a single-placeholder format string; an empty
///   pattern gives `""` and a pattern that cannot take the value is returned
///   as-is
pub fn format_value(value: &Value, pattern: &Value) -> Result<Value> {
    match (Shape::of(value), Shape::of(pattern)) {
        (Shape::Mapping(record), Shape::Mapping(patterns)) => {
            let pass_through = Value::String(PASS_THROUGH.to_string());
            let mut formatted = Record::new();
            for (key, item) in record {
                let item_pattern = patterns.get(key).unwrap_or(&pass_through);
                formatted.insert(key.clone(), format_value(item, item_pattern)?);
            }
            Ok(Value::Object(formatted))
        }
        _ => format_scalar(value, &py_str(pattern)).map(Value::String),
    }
}

/// Apply a single string pattern, falling back to the literal pattern
pub fn format_scalar(value: &Value, pattern: &str) -> Result<String> {
    if pattern.is_empty() {
        return Ok(String::new());
    }

    match printf::render(pattern, value)? {
        Some(rendered) => Ok(rendered),
        None => {
            trace!("pattern {:?} does not take the value, using it literally", pattern);
            Ok(pattern.to_string())
        }
    }
}

/// Format one attribute of a record; records without `key` come back unchanged
pub fn format_attribute(record: &Record, key: &str, pattern: &Value) -> Result<Record> {
    let mut formatted = record.clone();
    if let Some(current) = record.get(key) {
        formatted.insert(key.to_string(), format_value(current, pattern)?);
    }
    Ok(formatted)
}

/// Join the `str()` of the listed attributes; missing keys contribute nothing
pub fn join_attributes<S: AsRef<str>>(record: &Record, keys: &[S], sep: &str) -> String {
    attributes(record, keys)
        .iter()
        .map(py_str)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Store `join_attributes(record, keys, sep)` under `target_key`
pub fn merge_joined<S: AsRef<str>>(
    record: &Record,
    target_key: &str,
    keys: &[S],
    sep: &str,
) -> Record {
    let mut joined = Record::new();
    joined.insert(
        target_key.to_string(),
        Value::String(join_attributes(record, keys, sep)),
    );
    merge(record, &joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_format_scalar_patterns() {
        assert_eq!(format_value(&json!("a"), &json!("%sx")).unwrap(), json!("ax"));
        assert_eq!(format_value(&json!("a"), &json!("")).unwrap(), json!(""));
        assert_eq!(format_value(&json!(8080), &json!(":%d")).unwrap(), json!(":8080"));
    }

    #[test]
    fn test_literal_pattern_falls_back() {
        assert_eq!(format_value(&json!("a"), &json!("fixed")).unwrap(), json!("fixed"));
        assert_eq!(format_value(&json!("a"), &json!("%d")).unwrap(), json!("%d"));
    }

    #[test]
    fn test_format_mapping_with_patterns() {
        assert_eq!(
            format_value(&json!({"a": "first"}), &json!({"a": "x%s"})).unwrap(),
            json!({"a": "xfirst"})
        );
        assert_eq!(
            format_value(&json!({"a": "first"}), &json!({"a": "second"})).unwrap(),
            json!({"a": "second"})
        );
    }

    #[test]
    fn test_format_mapping_defaults_to_pass_through() {
        let value = json!({"a": "first", "b": 2, "c": true});
        let pattern = json!({"a": "<%s>"});
        assert_eq!(
            format_value(&value, &pattern).unwrap(),
            json!({"a": "<first>", "b": "2", "c": "True"})
        );
    }

    #[test]
    fn test_format_nested_mapping() {
        let value = json!({"outer": {"inner": "v", "other": "w"}});
        let pattern = json!({"outer": {"inner": "%s!"}});
        assert_eq!(
            format_value(&value, &pattern).unwrap(),
            json!({"outer": {"inner": "v!", "other": "w"}})
        );
    }

    #[test]
    fn test_mapping_value_with_string_pattern_uses_named_keys() {
        let value = json!({"host": "web", "port": 80});
        assert_eq!(
            format_value(&value, &json!("%(host)s:%(port)s")).unwrap(),
            json!("web:80")
        );
    }

    #[test]
    fn test_format_attribute() {
        let record = rec(json!({"name": "web", "port": 80}));
        let formatted = format_attribute(&record, "name", &json!("%s.example.com")).unwrap();
        assert_eq!(
            Value::Object(formatted),
            json!({"name": "web.example.com", "port": 80})
        );

        let untouched = format_attribute(&record, "missing", &json!("%s!")).unwrap();
        assert_eq!(untouched, record);
    }

    #[test]
    fn test_join_attributes_skips_missing() {
        let record = rec(json!({"first": "Ada", "last": "Lovelace", "age": 36}));
        assert_eq!(join_attributes(&record, &["first", "middle", "last"], " "), "Ada Lovelace");
        assert_eq!(join_attributes(&record, &["last", "age"], "-"), "Lovelace-36");
        assert_eq!(join_attributes(&record, &["nope"], " "), "");
    }

    #[test]
    fn test_merge_joined_adds_field() {
        let record = rec(json!({"first": "Ada", "last": "Lovelace"}));
        let merged = merge_joined(&record, "full", &["first", "last"], " ");
        assert_eq!(
            Value::Object(merged),
            json!({"first": "Ada", "last": "Lovelace", "full": "Ada Lovelace"})
        );
    }
}
