//! Helpers for loosely typed values
//!
//! Request data rarely arrives with the types a handler wants: numbers come in
//! as strings, flags as `0`/`1`, lists as objects. The functions here give the
//! rest of the workspace one consistent answer to "is this numeric", "is this
//! empty" and "how do these two values compare" without implicit coercion.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Number recovered from a JSON number or a numeric string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Fits a signed 64-bit integer
    Int(i64),
    /// Anything else
    Float(f64),
}

impl Numeric {
    /// Value as a float
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    /// Convert a JSON number
    pub fn from_number(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => Numeric::Int(i),
            None => Numeric::Float(n.as_f64().unwrap_or(0.0)),
        }
    }
}

/// Length in bytes of the longest numeric literal at the start of `s`.
///
/// Grammar: `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`.
/// An exponent marker without digits is not consumed.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if digits > 0 || end > frac_start {
            digits += end - frac_start;
            pos = end;
        }
    }

    if digits == 0 {
        return 0;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            pos = end;
        }
    }

    pos
}

fn numeric_from_literal(literal: &str) -> Option<Numeric> {
    let integral = literal
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'+' || b == b'-');
    if integral {
        if let Ok(i) = literal.parse::<i64>() {
            return Some(Numeric::Int(i));
        }
    }
    literal
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Numeric::Float)
}

/// Parse a whole string as a number.
///
/// Surrounding ASCII whitespace is ignored; anything else that is not part of
/// the literal makes the string non-numeric. Literals that overflow `f64` are
/// rejected.
pub fn parse_numeric(s: &str) -> Option<Numeric> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let len = numeric_prefix_len(trimmed);
    if len == 0 || len != trimmed.len() {
        return None;
    }
    numeric_from_literal(trimmed)
}

/// Number formed by the leading numeric prefix of `s`, or zero when there is none
pub fn leading_numeric(s: &str) -> Numeric {
    let trimmed = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let len = numeric_prefix_len(trimmed);
    if len == 0 {
        return Numeric::Int(0);
    }
    numeric_from_literal(&trimmed[..len]).unwrap_or(Numeric::Float(0.0))
}

/// Numeric view of a number or numeric string
pub fn as_numeric(value: &Value) -> Option<Numeric> {
    match value {
        Value::Number(n) => Some(Numeric::from_number(n)),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Truthiness: `null`, `false`, zero, `""`, `"0"` and empty containers are false
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => Numeric::from_number(n).as_f64() != 0.0,
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text form of a scalar; containers are rendered as compact JSON
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => match Numeric::from_number(n) {
            Numeric::Int(i) => i.to_string(),
            Numeric::Float(f) => f.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn compare_numeric(a: Numeric, b: Numeric) -> Option<Ordering> {
    match (a, b) {
        (Numeric::Int(x), Numeric::Int(y)) => Some(x.cmp(&y)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

fn compare_number_with_text(n: &Number, s: &str) -> Option<Ordering> {
    match parse_numeric(s) {
        Some(parsed) => compare_numeric(Numeric::from_number(n), parsed),
        None => Some(to_text(&Value::Number(n.clone())).as_str().cmp(s)),
    }
}

/// Loose ordering between two values.
///
/// Numbers and numeric strings compare numerically, other strings compare
/// lexically, booleans and `null` compare by truthiness (except `null` against
/// a string, which compares as `""`). Arrays compare by length, then element
/// by element; objects with the same key set compare value by value. A
/// container is greater than any scalar. `None` means the values are
/// incomparable.
pub fn loose_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, Value::String(s)) => Some("".cmp(s.as_str())),
        (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
        (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
            Some(truthy(a).cmp(&truthy(b)))
        }
        (Value::Number(x), Value::Number(y)) => {
            compare_numeric(Numeric::from_number(x), Numeric::from_number(y))
        }
        (Value::Number(n), Value::String(s)) => compare_number_with_text(n, s),
        (Value::String(s), Value::Number(n)) => {
            compare_number_with_text(n, s).map(Ordering::reverse)
        }
        (Value::String(x), Value::String(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(p), Some(q)) => compare_numeric(p, q),
            _ => Some(x.cmp(y)),
        },
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return Some(x.len().cmp(&y.len()));
            }
            for (left, right) in x.iter().zip(y) {
                match loose_cmp(left, right)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.len() != y.len() {
                return Some(x.len().cmp(&y.len()));
            }
            for (key, left) in x {
                let right = y.get(key)?;
                match loose_cmp(left, right)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Array(_), Value::Object(_)) | (Value::Object(_), Value::Array(_)) => None,
        (Value::Array(_) | Value::Object(_), _) => Some(Ordering::Greater),
        (_, Value::Array(_) | Value::Object(_)) => Some(Ordering::Less),
    }
}

/// Loose equality, see [`loose_cmp`]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    loose_cmp(a, b) == Some(Ordering::Equal)
}
