//! Structural reshaping of records
//!
//! Merging, key aliasing, projection and the conversions between a list of
//! records and a mapping keyed by one of their fields. None of these
//! functions mutate their inputs; every result is a fresh structure.

use super::format::format_value;
use crate::error::{ErrorCode, FilterError, Result};
use crate::value::{expect_record, py_str, type_name, Record};
use serde_json::Value;
use tracing::trace;

/// How `record_to_dict` turns a bare value into a mapping
#[derive(Debug, Clone, PartialEq)]
pub enum KeySpec {
    /// The value already is a sequence of `[key, value]` pairs
    Pairs,
    /// Wrap the value under a single key
    Key(String),
    /// Compute each key and value by formatting the value through a pattern
    Patterns(Record),
}

impl KeySpec {
    /// Interpret a loosely typed `keyed_by` argument
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => KeySpec::Pairs,
            Some(Value::Object(patterns)) => KeySpec::Patterns(patterns.clone()),
            Some(other) => KeySpec::Key(py_str(other)),
        }
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::Key(key.to_string())
    }
}

/// Shallow union where keys of `overrides` win
pub fn merge(base: &Record, overrides: &Record) -> Record {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// `merge` with the arguments swapped
pub fn merge_reverse(a: &Record, b: &Record) -> Record {
    merge(b, a)
}

/// Copy `record[source]` to `record[target]` for every `source -> target` pair
///
/// Pairs are applied in order against the accumulating copy, so a target
/// introduced by an earlier pair can act as the source of a later one.
pub fn alias(record: &Record, aliases: &Record) -> Result<Record> {
    let mut aliased = record.clone();
    for (source, target) in aliases {
        let value = aliased
            .get(source)
            .cloned()
            .ok_or_else(|| FilterError::missing_key(source.clone()))?;
        aliased.insert(py_str(target), value);
    }
    Ok(aliased)
}

/// Keep only the entries whose key is listed, in the record's own order
pub fn select<S: AsRef<str>>(record: &Record, keys: &[S]) -> Record {
    record
        .iter()
        .filter(|(key, _)| keys.iter().any(|k| k.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Remove every listed key; missing keys are ignored
pub fn drop<S: AsRef<str>>(record: &Record, keys: &[S]) -> Record {
    record
        .iter()
        .filter(|(key, _)| !keys.iter().any(|k| k.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Values of `keys` in the order given; absent keys are skipped
pub fn attributes<S: AsRef<str>>(record: &Record, keys: &[S]) -> Vec<Value> {
    keys.iter()
        .filter_map(|key| record.get(key.as_ref()).cloned())
        .collect()
}

/// Turn a bare value into a mapping
pub fn record_to_dict(value: &Value, keyed_by: &KeySpec) -> Result<Record> {
    match keyed_by {
        KeySpec::Pairs => pairs_to_record(value),
        KeySpec::Key(key) => {
            let mut record = Record::new();
            record.insert(key.clone(), value.clone());
            Ok(record)
        }
        KeySpec::Patterns(patterns) => {
            let mut record = Record::new();
            for (key_pattern, value_pattern) in patterns {
                let key = format_value(value, &Value::String(key_pattern.clone()))?;
                let formatted = format_value(value, value_pattern)?;
                record.insert(py_str(&key), formatted);
            }
            Ok(record)
        }
    }
}

fn pairs_to_record(value: &Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::Array(items) => {
            let mut record = Record::new();
            for (index, item) in items.iter().enumerate() {
                match item.as_array().map(Vec::as_slice) {
                    Some([key, value]) => {
                        record.insert(py_str(key), value.clone());
                    }
                    _ => {
                        return Err(FilterError::value_with_code(
                            ErrorCode::VALUE_INVALID_PAIR,
                            format!("element #{} is not a two-element pair", index),
                        ))
                    }
                }
            }
            Ok(record)
        }
        other => Err(FilterError::type_error(format!(
            "cannot build a mapping from {}",
            type_name(other)
        ))),
    }
}

/// Fold a keyed value back into its record as a named field
pub fn merge_into(keyed_value: &Value, record: &Record, key_field: &KeySpec) -> Result<Record> {
    let keyed = record_to_dict(keyed_value, key_field)?;
    Ok(merge(record, &keyed))
}

/// Split a record into `(record[key_field], remainder)`
pub fn extract_key(record: &Record, key_field: &str, remove_key: bool) -> Result<(Value, Record)> {
    let value = record
        .get(key_field)
        .cloned()
        .ok_or_else(|| FilterError::missing_key(key_field))?;

    let mut remainder = record.clone();
    if remove_key {
        remainder.shift_remove(key_field);
    }
    Ok((value, remainder))
}

/// Expand `{key: record}` into a list of records carrying `key` as a field
pub fn records_from_map(mapping: &Record, key_field: &KeySpec) -> Result<Vec<Value>> {
    mapping
        .iter()
        .map(|(key, value)| {
            let record = expect_record(value, &format!("entry '{}'", key))?;
            merge_into(&Value::String(key.clone()), record, key_field).map(Value::Object)
        })
        .collect()
}

/// Index records by their `key_field`; later duplicates overwrite earlier ones
pub fn map_from_records(records: &[Value], key_field: &str, remove_key: bool) -> Result<Record> {
    let mut mapping = Record::new();
    for (index, item) in records.iter().enumerate() {
        let record = expect_record(item, &format!("record #{}", index))?;
        let (key, remainder) = extract_key(record, key_field, remove_key)?;
        mapping.insert(py_str(&key), Value::Object(remainder));
    }
    Ok(mapping)
}

struct Bucket {
    key: Vec<Value>,
    fields: Record,
    items: Vec<Value>,
}

/// Group records by the values of `key_fields`
///
/// The grouping key is the projection of `key_fields` through `attributes`,
/// so a record missing one of them groups under a shorter key. Without a
/// `group_field` each bucket collects the records minus their key fields
/// under `data`; with one, it collects that field's values under its own name.
pub fn group<S: AsRef<str>>(
    records: &[Value],
    key_fields: &[S],
    group_field: Option<&str>,
) -> Result<Vec<Value>> {
    let mut buckets: Vec<Bucket> = Vec::new();

    for (index, item) in records.iter().enumerate() {
        let record = expect_record(item, &format!("record #{}", index))?;
        let key = attributes(record, key_fields);

        let position = match buckets.iter().position(|b| b.key == key) {
            Some(position) => position,
            None => {
                buckets.push(Bucket {
                    fields: select(record, key_fields),
                    key,
                    items: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[position];

        match group_field {
            None => bucket.items.push(Value::Object(drop(record, key_fields))),
            Some(field) => match record.get(field) {
                Some(value) => bucket.items.push(value.clone()),
                None => trace!("record #{} has no '{}', skipping", index, field),
            },
        }
    }

    let output_field = group_field.unwrap_or("data");
    Ok(buckets
        .into_iter()
        .map(|bucket| {
            let mut fields = bucket.fields;
            fields.insert(output_field.to_string(), Value::Array(bucket.items));
            Value::Object(fields)
        })
        .collect())
}
