//! Path flattening of nested values
//!
//! Both flatteners walk mappings and sequences depth first, naming each leaf
//! by the path of keys and indices leading to it. `to_kv` yields an ordered
//! list of `{key, value}` entries and accepts any root; `flatten` yields a
//! single mapping and only accepts a mapping root.

use crate::error::{ErrorCode, FilterError, Result};
use crate::value::{type_name, Record, Shape};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One leaf produced by `to_kv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub key: String,
    pub value: Value,
}

/// Separator used by `flatten` and the default for `to_kv`
pub const DEFAULT_SEPARATOR: &str = ".";

fn join_path(prefix: &str, sep: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, sep, segment)
    }
}

/// List every scalar leaf of `value` with its `sep`-joined path
///
/// A scalar root yields a single entry keyed by `prefix` (possibly empty).
pub fn to_kv(value: &Value, sep: &str, prefix: &str) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    collect_entries(value, sep, prefix, &mut entries);
    entries
}

fn collect_entries(value: &Value, sep: &str, prefix: &str, entries: &mut Vec<PathEntry>) {
    match Shape::of(value) {
        Shape::Mapping(map) => {
            for (key, child) in map {
                collect_entries(child, sep, &join_path(prefix, sep, key), entries);
            }
        }
        Shape::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_entries(child, sep, &join_path(prefix, sep, &index.to_string()), entries);
            }
        }
        Shape::Scalar(leaf) => entries.push(PathEntry {
            key: prefix.to_string(),
            value: leaf.clone(),
        }),
    }
}

/// Flatten a nested mapping into `{dotted.path: leaf}`
pub fn flatten(value: &Value) -> Result<Record> {
    let Value::Object(root) = value else {
        return Err(FilterError::type_with_code(
            ErrorCode::TYPE_EXPECTED_MAPPING,
            format!("flatten expects a mapping, got {}", type_name(value)),
        ));
    };

    let mut flat = Record::new();
    for (key, child) in root {
        flatten_into(child, key, &mut flat);
    }
    Ok(flat)
}

fn flatten_into(value: &Value, path: &str, flat: &mut Record) {
    match Shape::of(value) {
        Shape::Mapping(map) => {
            for (key, child) in map {
                flatten_into(child, &join_path(path, DEFAULT_SEPARATOR, key), flat);
            }
        }
        Shape::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                let segment = index.to_string();
                flatten_into(child, &join_path(path, DEFAULT_SEPARATOR, &segment), flat);
            }
        }
        Shape::Scalar(leaf) => {
            flat.insert(path.to_string(), leaf.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(key: &str, value: Value) -> PathEntry {
        PathEntry {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn test_to_kv_nested_mapping() {
        let entries = to_kv(&json!({"a": {"b": "c"}, "d": "e"}), ".", "");
        assert_eq!(entries, vec![entry("a.b", json!("c")), entry("d", json!("e"))]);
    }

    #[test]
    fn test_to_kv_sequences_use_indices() {
        let entries = to_kv(&json!({"hosts": ["a", {"ip": "10.0.0.1"}]}), ".", "");
        assert_eq!(
            entries,
            vec![entry("hosts.0", json!("a")), entry("hosts.1.ip", json!("10.0.0.1"))]
        );
    }

    #[test]
    fn test_to_kv_custom_and_empty_separator() {
        let value = json!({"a": {"b": 1}});
        assert_eq!(to_kv(&value, "/", ""), vec![entry("a/b", json!(1))]);
        assert_eq!(to_kv(&value, "", ""), vec![entry("ab", json!(1))]);
        assert_eq!(to_kv(&value, ".", "root"), vec![entry("root.a.b", json!(1))]);
    }

    #[test]
    fn test_to_kv_scalar_root() {
        assert_eq!(to_kv(&json!("text"), ".", ""), vec![entry("", json!("text"))]);
        assert_eq!(to_kv(&json!(null), ".", "p"), vec![entry("p", json!(null))]);
    }

    #[test]
    fn test_to_kv_empty_containers_yield_nothing() {
        assert!(to_kv(&json!({}), ".", "").is_empty());
        assert!(to_kv(&json!({"a": []}), ".", "").is_empty());
    }

    #[test]
    fn test_to_kv_entries_serialize_as_key_value_objects() {
        let entries = to_kv(&json!({"a": 1}), ".", "");
        assert_eq!(
            serde_json::to_value(entries).unwrap(),
            json!([{"key": "a", "value": 1}])
        );
    }

    #[test]
    fn test_flatten_nested() {
        let flat = flatten(&json!({
            "a": {"b": {"c": 1}},
            "list": [10, {"x": true}],
            "plain": "v"
        }))
        .unwrap();
        assert_eq!(
            Value::Object(flat),
            json!({"a.b.c": 1, "list.0": 10, "list.1.x": true, "plain": "v"})
        );
    }

    #[test]
    fn test_flatten_rejects_non_mapping_root() {
        assert!(flatten(&json!([1, 2])).unwrap_err().is_type());
        assert!(flatten(&json!("x")).unwrap_err().is_type());
    }
}
