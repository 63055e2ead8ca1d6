//! Primitive casts applied to stored values

use crate::error::SiftError;
use crate::value::{leading_numeric, to_text, truthy, Numeric};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Target type for [`Cast::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cast {
    /// Boolean by truthiness
    Bool,
    /// Signed 64-bit integer
    Int,
    /// 64-bit float
    Float,
    /// String
    String,
    /// Array (containers are kept, scalars wrapped)
    Array,
    /// Null
    Null,
}

impl Cast {
    /// Coerce `value` to this type
    pub fn apply(self, value: &Value) -> Value {
        match self {
            Cast::Bool => Value::Bool(truthy(value)),
            Cast::Int => Value::from(to_int(value)),
            Cast::Float => Value::from(to_float(value)),
            Cast::String => Value::String(to_text(value)),
            Cast::Array => match value {
                Value::Null => Value::Array(Vec::new()),
                Value::Array(_) | Value::Object(_) => value.clone(),
                scalar => Value::Array(vec![scalar.clone()]),
            },
            Cast::Null => Value::Null,
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            Cast::Bool => "bool",
            Cast::Int => "int",
            Cast::Float => "float",
            Cast::String => "string",
            Cast::Array => "array",
            Cast::Null => "null",
        }
    }
}

/// Stored `value` coerced with `cast`, or `default` unchanged when there is none
pub fn cast_or(value: Option<&Value>, default: impl Into<Value>, cast: Option<Cast>) -> Value {
    match (value, cast) {
        (Some(value), Some(cast)) => cast.apply(value),
        (Some(value), None) => value.clone(),
        (None, _) => default.into(),
    }
}

/// Look `key` up in a plain map and optionally cast it.
///
/// The lookup is exact; an absent key yields `default` without casting.
pub fn get(
    data: &Map<String, Value>,
    key: &str,
    default: impl Into<Value>,
    cast: Option<Cast>,
) -> Value {
    cast_or(data.get(key), default, cast)
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}

fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => match Numeric::from_number(n) {
            Numeric::Int(i) => i,
            Numeric::Float(f) => float_to_int(f),
        },
        Value::String(s) => match leading_numeric(s) {
            Numeric::Int(i) => i,
            Numeric::Float(f) => float_to_int(f),
        },
        Value::Array(_) | Value::Object(_) => i64::from(truthy(value)),
    }
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => Numeric::from_number(n).as_f64(),
        Value::String(s) => leading_numeric(s).as_f64(),
        Value::Array(_) | Value::Object(_) => f64::from(u8::from(truthy(value))),
    }
}

impl FromStr for Cast {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(Cast::Bool),
            "int" | "integer" => Ok(Cast::Int),
            "float" | "double" => Ok(Cast::Float),
            "string" => Ok(Cast::String),
            "array" => Ok(Cast::Array),
            "null" => Ok(Cast::Null),
            _ => Err(SiftError::UnknownCast(s.to_string())),
        }
    }
}

impl fmt::Display for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
