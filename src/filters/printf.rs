//! Single-argument `%`-style string formatting
//!
//! Implements the printf dialect templates use with `format_value`:
//! conversions `s r a d i u c x X o e E f F g G`, the `%%` escape, flags
//! `- + space 0 #`, width, precision and `%(key)s` lookups into a mapping
//! argument.
//!
//! Rendering distinguishes two kinds of failure. Argument mismatches (no
//! placeholder for the argument, more placeholders than arguments, a numeric
//! conversion given text) yield `Ok(None)` so the caller can fall back to the
//! literal pattern. Malformed patterns are reported as value errors.

use crate::error::{ErrorCode, FilterError, Result};
use crate::value::{py_repr, py_str};
use serde_json::Value;

/// One parsed conversion specifier
#[derive(Debug, Clone, Default, PartialEq)]
struct Spec {
    key: Option<String>,
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    star: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    Spec(Spec),
}

/// Render `pattern` with `arg` as the single substitution argument
///
/// Returns `Ok(None)` when the argument does not fit the pattern.
pub fn render(pattern: &str, arg: &Value) -> Result<Option<String>> {
    let pieces = parse(pattern)?;
    let mut out = String::with_capacity(pattern.len());
    let mut consumed = false;

    for piece in &pieces {
        let spec = match piece {
            Piece::Literal(text) => {
                out.push_str(text);
                continue;
            }
            Piece::Spec(spec) => spec,
        };

        if spec.star {
            return Ok(None);
        }

        let target = match &spec.key {
            Some(key) => {
                let Value::Object(map) = arg else {
                    return Ok(None);
                };
                map.get(key).ok_or_else(|| {
                    FilterError::lookup_with_code(
                        ErrorCode::LOOKUP_FORMAT_KEY,
                        key.clone(),
                        format!("format key '{}' not found in argument", key),
                    )
                })?
            }
            None => {
                if consumed {
                    return Ok(None);
                }
                consumed = true;
                arg
            }
        };

        match convert(spec, target)? {
            Some(text) => out.push_str(&text),
            None => return Ok(None),
        }
    }

    // A mapping argument may go unused; anything else must be consumed
    if !consumed && !arg.is_object() {
        return Ok(None);
    }

    Ok(Some(out))
}

fn parse(pattern: &str) -> Result<Vec<Piece>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            literal.push(chars[i]);
            i += 1;
            continue;
        }

        i += 1;
        if chars.get(i) == Some(&'%') {
            literal.push('%');
            i += 1;
            continue;
        }

        let mut spec = Spec::default();

        if chars.get(i) == Some(&'(') {
            let (key, next) = parse_key(&chars, i)?;
            spec.key = Some(key);
            i = next;
        }

        while let Some(&flag) = chars.get(i) {
            match flag {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                '#' => spec.alt = true,
                _ => break,
            }
            i += 1;
        }

        if chars.get(i) == Some(&'*') {
            spec.star = true;
            i += 1;
        } else {
            spec.width = parse_number(&chars, &mut i);
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            if chars.get(i) == Some(&'*') {
                spec.star = true;
                i += 1;
            } else {
                spec.precision = Some(parse_number(&chars, &mut i));
            }
        }

        while matches!(chars.get(i), Some('h' | 'l' | 'L')) {
            i += 1;
        }

        let conversion = *chars.get(i).ok_or_else(|| {
            FilterError::value_with_code(ErrorCode::VALUE_INVALID_FORMAT, "incomplete format")
        })?;

        if !"srauidcxXoeEfFgG".contains(conversion) {
            return Err(FilterError::value_with_code(
                ErrorCode::VALUE_INVALID_FORMAT,
                format!(
                    "unsupported format character '{}' (0x{:x}) at index {}",
                    conversion, conversion as u32, i
                ),
            ));
        }
        spec.conversion = conversion;
        i += 1;

        if !literal.is_empty() {
            pieces.push(Piece::Literal(std::mem::take(&mut literal)));
        }
        pieces.push(Piece::Spec(spec));
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }

    Ok(pieces)
}

/// Parse `(key)` starting at the opening parenthesis, honouring nested parens
fn parse_key(chars: &[char], open: usize) -> Result<(String, usize)> {
    let mut depth = 0usize;
    let mut key = String::new();

    for (offset, &ch) in chars[open..].iter().enumerate() {
        match ch {
            '(' => {
                depth += 1;
                if depth > 1 {
                    key.push(ch);
                }
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((key, open + offset + 1));
                }
                key.push(ch);
            }
            _ => key.push(ch),
        }
    }

    Err(FilterError::value_with_code(
        ErrorCode::VALUE_INVALID_FORMAT,
        "incomplete format key",
    ))
}

fn parse_number(chars: &[char], i: &mut usize) -> usize {
    let mut n = 0usize;
    while let Some(d) = chars.get(*i).and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as usize);
        *i += 1;
    }
    n
}

fn convert(spec: &Spec, arg: &Value) -> Result<Option<String>> {
    let rendered = match spec.conversion {
        's' => Some(pad_text(truncate(py_str(arg), spec.precision), spec)),
        'r' | 'a' => Some(pad_text(truncate(py_repr(arg), spec.precision), spec)),
        'c' => char_arg(arg).map(|c| pad_text(c.to_string(), spec)),
        'd' | 'i' | 'u' => {
            int_arg(arg)?.map(|(negative, digits)| finish_int(negative, digits, spec))
        }
        'x' | 'X' | 'o' => strict_int_arg(arg).map(|n| format_int(n, spec)),
        _ => float_arg(arg).map(|f| format_float(f, spec)),
    };
    Ok(rendered)
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(p) if text.chars().count() > p => text.chars().take(p).collect(),
        _ => text,
    }
}

fn pad_text(text: String, spec: &Spec) -> String {
    let len = text.chars().count();
    if spec.width <= len {
        return text;
    }
    let fill = " ".repeat(spec.width - len);
    if spec.left {
        text + &fill
    } else {
        fill + &text
    }
}

fn pad_numeric(prefix: &str, body: &str, spec: &Spec, allow_zero: bool) -> String {
    let len = prefix.chars().count() + body.chars().count();
    if spec.width <= len {
        return format!("{}{}", prefix, body);
    }
    let fill = spec.width - len;
    if spec.left {
        format!("{}{}{}", prefix, body, " ".repeat(fill))
    } else if spec.zero && allow_zero {
        format!("{}{}{}", prefix, "0".repeat(fill), body)
    } else {
        format!("{}{}{}", " ".repeat(fill), prefix, body)
    }
}

fn sign_for(negative: bool, spec: &Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn char_arg(arg: &Value) -> Option<char> {
    match arg {
        Value::String(s) if s.chars().count() == 1 => s.chars().next(),
        Value::Number(n) => n
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32),
        _ => None,
    }
}

/// Sign and decimal magnitude for `%d`
///
/// Floats are truncated toward zero and keep every digit of their exact
/// value, however large.
fn int_arg(arg: &Value) -> Result<Option<(bool, String)>> {
    match arg {
        Value::Number(n) if n.is_f64() => {
            let f = n.as_f64().unwrap_or(f64::NAN);
            if f.is_finite() {
                let whole = f.trunc();
                Ok(Some((whole < 0.0, format!("{:.0}", whole.abs()))))
            } else {
                Err(FilterError::value(format!(
                    "cannot convert float {} to integer",
                    py_str(arg)
                )))
            }
        }
        _ => Ok(strict_int_arg(arg).map(|n| (n < 0, n.unsigned_abs().to_string()))),
    }
}

/// Integer argument for `%x` and `%o`: floats are rejected
fn strict_int_arg(arg: &Value) -> Option<i128> {
    match arg {
        Value::Bool(b) => Some(i128::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

fn float_arg(arg: &Value) -> Option<f64> {
    match arg {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn format_int(n: i128, spec: &Spec) -> String {
    let magnitude = n.unsigned_abs();
    let digits = match spec.conversion {
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        'o' => format!("{:o}", magnitude),
        _ => magnitude.to_string(),
    };
    finish_int(n < 0, digits, spec)
}

fn finish_int(negative: bool, mut digits: String, spec: &Spec) -> String {
    if let Some(p) = spec.precision {
        if digits.len() < p {
            digits = format!("{}{}", "0".repeat(p - digits.len()), digits);
        }
    }

    let radix_prefix = match (spec.alt, spec.conversion) {
        (true, 'x') => "0x",
        (true, 'X') => "0X",
        (true, 'o') => "0o",
        _ => "",
    };

    let prefix = format!("{}{}", sign_for(negative, spec), radix_prefix);
    pad_numeric(&prefix, &digits, spec, true)
}

fn format_float(f: f64, spec: &Spec) -> String {
    let upper = spec.conversion.is_ascii_uppercase();
    let sign = sign_for(f.is_sign_negative() && !f.is_nan(), spec);

    if !f.is_finite() {
        let body = if f.is_nan() { "nan" } else { "inf" };
        let body = if upper { body.to_uppercase() } else { body.to_string() };
        return pad_numeric(sign, &body, spec, false);
    }

    let abs = f.abs();
    let precision = spec.precision.unwrap_or(6);
    let body = match spec.conversion.to_ascii_lowercase() {
        'f' => {
            let mut fixed = format!("{:.*}", precision, abs);
            if spec.alt && precision == 0 {
                fixed.push('.');
            }
            fixed
        }
        'e' => exponent_format(abs, precision, upper),
        _ => general_format(abs, precision, spec.alt, upper),
    };

    pad_numeric(sign, &body, spec, true)
}

/// `1.500000e+00` style: at least two exponent digits with explicit sign
fn exponent_format(abs: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, abs);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    let e = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:0>2}", mantissa, e, sign, digits)
}

fn general_format(abs: f64, precision: usize, alt: bool, upper: bool) -> String {
    let p = precision.max(1);
    let exp = if abs == 0.0 {
        0
    } else {
        let raw = format!("{:.*e}", p - 1, abs);
        raw.split_once('e')
            .and_then(|(_, e)| e.parse::<i32>().ok())
            .unwrap_or(0)
    };

    let p_i32 = i32::try_from(p).unwrap_or(i32::MAX);
    let formatted = if (-4..p_i32).contains(&exp) {
        let decimals = usize::try_from(p_i32 - 1 - exp).unwrap_or(0);
        format!("{:.*}", decimals, abs)
    } else {
        exponent_format(abs, p - 1, upper)
    };

    if alt {
        return formatted;
    }

    match formatted.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => {
            let (mantissa, exponent) = formatted.split_at(pos);
            format!("{}{}", strip_fraction_zeros(mantissa), exponent)
        }
        None => strip_fraction_zeros(&formatted).to_string(),
    }
}

fn strip_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
