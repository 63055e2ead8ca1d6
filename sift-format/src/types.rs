//! Value kind enumeration

use serde_json::Value;
use std::fmt;

/// Kind of a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Present but null
    Null,
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// String value
    String,
    /// Array (list)
    Array,
    /// Object (map)
    Object,
}

impl ValueKind {
    /// Classify a raw value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Int,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Lower-case name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Whether the kind is a container
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind_of() {
        let cases = vec![
            (json!(null), ValueKind::Null),
            (json!(true), ValueKind::Bool),
            (json!(1), ValueKind::Int),
            (json!(u64::MAX), ValueKind::Int),
            (json!(1.5), ValueKind::Float),
            (json!("a"), ValueKind::String),
            (json!([1]), ValueKind::Array),
            (json!({"a": 1}), ValueKind::Object),
        ];

        for (value, expected) in cases {
            assert_eq!(ValueKind::of(&value), expected);
        }
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(ValueKind::Int.to_string(), "int");
        assert_eq!(ValueKind::Object.name(), "object");
        assert!(ValueKind::Array.is_container());
        assert!(!ValueKind::String.is_container());
    }
}
