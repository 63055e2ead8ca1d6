//! Typed accessors over untyped request data
//!
//! Every accessor runs the same pipeline:
//!
//! 1. presence: a key counts as present when it is stored and not empty
//!    (`""`, `null`, `[]` and `{}` are empty; `"0"`, `0` and `false` are not)
//! 2. retrieval: present values are returned, absent ones fail when required
//!    and fall back to the caller's default otherwise
//! 3. rule: the optional [`Rule`] is checked against the retrieved value
//! 4. coercion: the value is checked (and for numbers, converted) to the
//!    accessor's type
//!
//! The first failing step returns its error; nothing is collected or retried.

use crate::rule::Rule;
use serde::Serialize;
use serde_json::{Map, Value};
use sift_format::constants::{DATETIME_EXAMPLE, DATE_EXAMPLE, TIMESTAMP_MAX, TIMESTAMP_MIN};
use sift_format::json::{self, JsonOptions};
use sift_format::value::{as_numeric, parse_numeric, Numeric};
use sift_format::{is_date, is_datetime, is_timestamp, Result, SiftError, ValueKind};
use tracing::debug;

/// Validating wrapper over a raw key/value map
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Input {
    data: Map<String, Value>,
}

fn rejected(err: SiftError) -> SiftError {
    debug!(key = err.key().unwrap_or_default(), error = %err, "input rejected");
    err
}

fn type_mismatch(key: &str, expected: &'static str, value: Value) -> SiftError {
    rejected(SiftError::TypeMismatch {
        key: key.to_string(),
        expected,
        value,
    })
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.contains('.') => match parse_numeric(s)? {
            Numeric::Int(i) => Some(i),
            Numeric::Float(f) => {
                let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
                (f.fract() == 0.0 && in_range).then_some(f as i64)
            }
        },
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    as_numeric(value).map(Numeric::as_f64)
}

impl Input {
    /// Wrap `data`
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Wrap a JSON object; any other value is a type mismatch on key `$`
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self::new(data)),
            other => Err(type_mismatch("$", ValueKind::Object.name(), other)),
        }
    }

    /// Parse a JSON request body
    pub fn from_json(body: &str) -> Result<Self> {
        Self::from_value(json::decode(body)?)
    }

    /// Whether `key` is stored, even with an empty value
    pub fn exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Whether `key` is stored with a non-empty value
    pub fn has(&self, key: &str) -> bool {
        match self.data.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }

    /// Stored value when present, `default` when absent and optional
    pub fn get(&self, key: &str, required: bool, default: impl Into<Value>) -> Result<Value> {
        if self.has(key) {
            return Ok(self.data[key].clone());
        }
        if required {
            return Err(rejected(SiftError::RequiredParameterMissing {
                key: key.to_string(),
            }));
        }
        Ok(default.into())
    }

    fn fetch(
        &self,
        key: &str,
        required: bool,
        default: Value,
        rule: Option<&Rule>,
    ) -> Result<Value> {
        let value = self.get(key, required, default)?;
        if let Some(rule) = rule {
            rule.check(key, &value).map_err(rejected)?;
        }
        Ok(value)
    }

    /// Integer, also accepting numeric strings without a decimal point
    pub fn int(&self, key: &str, required: bool, default: i64, rule: Option<&Rule>) -> Result<i64> {
        let value = self.fetch(key, required, Value::from(default), rule)?;
        coerce_int(&value).ok_or_else(|| type_mismatch(key, ValueKind::Int.name(), value))
    }

    /// Float, accepting any number or numeric string
    pub fn float(
        &self,
        key: &str,
        required: bool,
        default: f64,
        rule: Option<&Rule>,
    ) -> Result<f64> {
        let value = self.fetch(key, required, Value::from(default), rule)?;
        coerce_float(&value).ok_or_else(|| type_mismatch(key, ValueKind::Float.name(), value))
    }

    /// Native boolean; strings such as `"true"` are rejected
    pub fn bool(
        &self,
        key: &str,
        required: bool,
        default: bool,
        rule: Option<&Rule>,
    ) -> Result<bool> {
        match self.fetch(key, required, Value::Bool(default), rule)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch(key, ValueKind::Bool.name(), other)),
        }
    }

    /// Native string
    pub fn string(
        &self,
        key: &str,
        required: bool,
        default: &str,
        rule: Option<&Rule>,
    ) -> Result<String> {
        match self.fetch(key, required, Value::from(default), rule)? {
            Value::String(s) => Ok(s),
            other => Err(type_mismatch(key, ValueKind::String.name(), other)),
        }
    }

    /// `YYYY-MM-DD` string
    pub fn date(
        &self,
        key: &str,
        required: bool,
        default: &str,
        rule: Option<&Rule>,
    ) -> Result<String> {
        let value = self.string(key, required, default, rule)?;
        if is_date(&value) {
            return Ok(value);
        }
        Err(rejected(SiftError::FormatInvalid {
            key: key.to_string(),
            kind: "date",
            example: DATE_EXAMPLE,
            value: Value::String(value),
        }))
    }

    /// `YYYY-MM-DD HH:MM:SS` string
    pub fn datetime(
        &self,
        key: &str,
        required: bool,
        default: &str,
        rule: Option<&Rule>,
    ) -> Result<String> {
        let value = self.string(key, required, default, rule)?;
        if is_datetime(&value) {
            return Ok(value);
        }
        Err(rejected(SiftError::FormatInvalid {
            key: key.to_string(),
            kind: "datetime",
            example: DATETIME_EXAMPLE,
            value: Value::String(value),
        }))
    }

    /// Integer within `[0, 2147483647]`
    pub fn timestamp(
        &self,
        key: &str,
        required: bool,
        default: i64,
        rule: Option<&Rule>,
    ) -> Result<i64> {
        let value = self.int(key, required, default, rule)?;
        if is_timestamp(value) {
            return Ok(value);
        }
        Err(rejected(SiftError::RangeInvalid {
            key: key.to_string(),
            value,
            min: TIMESTAMP_MIN,
            max: TIMESTAMP_MAX,
        }))
    }

    /// Array or object
    pub fn array(
        &self,
        key: &str,
        required: bool,
        default: Value,
        rule: Option<&Rule>,
    ) -> Result<Value> {
        let value = self.fetch(key, required, default, rule)?;
        if ValueKind::of(&value).is_container() {
            return Ok(value);
        }
        Err(type_mismatch(key, ValueKind::Array.name(), value))
    }

    /// Nested input over the required array or object at `key`.
    ///
    /// Lists are keyed by position (`"0"`, `"1"`, ...).
    pub fn object(&self, key: &str) -> Result<Input> {
        let data = match self.array(key, true, Value::Array(Vec::new()), None)? {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect(),
            _ => Map::new(),
        };
        Ok(Input::new(data))
    }

    /// Raw data, unvalidated
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Copy of the raw data, unvalidated
    pub fn to_array(&self) -> Map<String, Value> {
        self.data.clone()
    }

    /// Take the raw data
    pub fn into_inner(self) -> Map<String, Value> {
        self.data
    }

    /// Raw data as JSON, non-ASCII characters left verbatim
    pub fn to_json(&self) -> Result<String> {
        json::encode(&self.data, JsonOptions::UNESCAPED_UNICODE)
    }
}

impl From<Map<String, Value>> for Input {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

impl TryFrom<Value> for Input {
    type Error = SiftError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> Input {
        Input::from_value(value).unwrap()
    }

    #[test]
    fn test_presence() {
        let input = input(json!({
            "empty": "",
            "zero": "0",
            "num": 0,
            "no": false,
            "nothing": null,
            "list": [],
            "map": {"a": 1}
        }));
        assert!(!input.has("empty"));
        assert!(input.exists("empty"));
        assert!(input.has("zero"));
        assert!(input.has("num"));
        assert!(input.has("no"));
        assert!(!input.has("nothing"));
        assert!(!input.has("list"));
        assert!(input.has("map"));
        assert!(!input.has("missing"));
        assert!(!input.exists("missing"));
    }

    #[test]
    fn test_numeric_string_coerces_to_int() {
        let input = input(json!({"a": "1", "b": "1.5", "c": "1e3", "d": 2.0, "e": "-7"}));
        assert_eq!(input.int("a", true, 0, None).unwrap(), 1);
        assert!(matches!(
            input.int("b", true, 0, None),
            Err(SiftError::TypeMismatch { expected: "int", .. })
        ));
        assert_eq!(input.int("c", true, 0, None).unwrap(), 1000);
        assert!(input.int("d", true, 0, None).is_err());
        assert_eq!(input.int("e", true, 0, None).unwrap(), -7);
    }

    #[test]
    fn test_float_accepts_any_number() {
        let input = input(json!({"i": 3, "f": 1.1, "s": "12.3", "t": "12", "x": "abc"}));
        assert_eq!(input.float("i", true, 0.0, None).unwrap(), 3.0);
        assert_eq!(input.float("f", true, 0.0, None).unwrap(), 1.1);
        assert_eq!(input.float("s", true, 0.0, None).unwrap(), 12.3);
        assert_eq!(input.float("t", true, 0.0, None).unwrap(), 12.0);
        assert!(input.float("x", true, 0.0, None).is_err());
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let input = Input::default();
        assert_eq!(input.string("missing", false, "fallback", None).unwrap(), "fallback");
        assert_eq!(input.get("missing", false, 5).unwrap(), json!(5));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let input = input(json!({"x": ""}));
        let err = input.string("x", true, "", None).unwrap_err();
        assert!(matches!(err, SiftError::RequiredParameterMissing { ref key } if key == "x"));
        assert_eq!(input.string("x", false, "dflt", None).unwrap(), "dflt");
    }

    #[test]
    fn test_rule_checked_before_coercion() {
        let input = input(json!({"n": 5, "s": "15"}));
        let rule = Rule::gt(10);
        assert!(matches!(
            input.int("n", true, 0, Some(&rule)),
            Err(SiftError::ComparisonFailed { .. })
        ));
        assert_eq!(input.int("s", true, 0, Some(&rule)).unwrap(), 15);
        // the default is subject to the rule as well
        assert!(input.int("missing", false, 0, Some(&rule)).is_err());
    }

    #[test]
    fn test_object_wraps_nested_data() {
        let input = input(json!({"user": {"id": "42"}, "tags": ["a", "b"], "name": "x"}));
        let user = input.object("user").unwrap();
        assert_eq!(user.int("id", true, 0, None).unwrap(), 42);

        let tags = input.object("tags").unwrap();
        assert_eq!(tags.string("1", true, "", None).unwrap(), "b");

        assert!(matches!(
            input.object("name"),
            Err(SiftError::TypeMismatch { expected: "array", .. })
        ));
        assert!(matches!(
            input.object("missing"),
            Err(SiftError::RequiredParameterMissing { .. })
        ));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(matches!(
            Input::from_value(json!([1])),
            Err(SiftError::TypeMismatch { ref key, .. }) if key == "$"
        ));
    }

    #[test]
    fn test_to_json_keeps_unicode() {
        let input = input(json!({"name": "Zoë", "url": "a/b"}));
        assert_eq!(input.to_json().unwrap(), r#"{"name":"Zoë","url":"a\/b"}"#);
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"name": "Zoë", "url": "a/b"}));
    }
}
