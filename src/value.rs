//! Value shapes and scalar rendering
//!
//! Filters receive loosely typed `serde_json::Value`s from the template host.
//! `Shape` classifies a value once at the boundary of each filter so the rest
//! of the code can pattern match instead of probing capabilities at runtime.
//! The rendering helpers reproduce the host language's `str()` and `repr()`
//! conventions, which templates rely on when values are interpolated.

use crate::error::{ErrorCode, FilterError, Result};
use serde_json::{Map, Number, Value};

/// A record: an ordered mapping from string keys to values
pub type Record = Map<String, Value>;

/// Tagged view over a value
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Mapping(&'a Record),
    Sequence(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> Shape<'a> {
    /// Classify a value. Strings are scalars, never sequences.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Shape::Mapping(map),
            Value::Array(items) => Shape::Sequence(items),
            other => Shape::Scalar(other),
        }
    }
}

/// Borrow a value as a record or fail with a type error naming the argument
pub fn expect_record<'a>(value: &'a Value, what: &str) -> Result<&'a Record> {
    value.as_object().ok_or_else(|| {
        FilterError::type_with_code(
            ErrorCode::TYPE_EXPECTED_MAPPING,
            format!("{} must be a mapping, got {}", what, type_name(value)),
        )
    })
}

/// Borrow a value as a sequence or fail with a type error naming the argument
pub fn expect_sequence<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        FilterError::type_with_code(
            ErrorCode::TYPE_EXPECTED_SEQUENCE,
            format!("{} must be a sequence, got {}", what, type_name(value)),
        )
    })
}

/// Borrow a value as a string or fail with a type error naming the argument
pub fn expect_str<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        FilterError::type_with_code(
            ErrorCode::TYPE_EXPECTED_STRING,
            format!("{} must be a string, got {}", what, type_name(value)),
        )
    })
}

/// Key list argument: a single key or a sequence of keys
///
/// Non-string keys are rendered with `py_str` so `[1, "a"]` selects `"1"` and `"a"`.
pub fn key_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(py_str).collect(),
        Value::Null => Vec::new(),
        other => vec![py_str(other)],
    }
}

/// Short type name used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Standard truthiness: null, false, zero and empty containers are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a value the way `str()` does
pub fn py_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => py_repr(other),
    }
}

/// Render a value the way `repr()` does
pub fn py_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number_repr(n),
        Value::String(s) => string_repr(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(py_repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_repr(k), py_repr(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

fn number_repr(n: &Number) -> String {
    if n.is_f64() {
        n.as_f64().map(float_repr).unwrap_or_else(|| n.to_string())
    } else {
        n.to_string()
    }
}

/// Shortest round-trip float rendering with a trailing `.0` for integral values
/// and scientific notation outside `1e-4 <= |x| < 1e16`
pub fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let abs = f.abs();
    if !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", f);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        };
    }

    let plain = f.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Quote a string with single quotes, falling back to double quotes when the
/// string contains a single quote and no double quote
fn string_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
