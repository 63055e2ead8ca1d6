//! Sift Test Utilities
//!
//! This crate provides shared fixtures and helpers for the Sift test suites.

use serde_json::{Map, Value};

/// Builder for creating test records with common patterns.
///
/// Keys keep insertion order, matching the order-preserving maps used by the
/// library crates.
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    /// Create a new record builder
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field with a string value
    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a field with an integer value
    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), Value::from(value));
        self
    }

    /// Add a field with a float value
    pub fn float(mut self, key: &str, value: f64) -> Self {
        self.fields.insert(key.to_string(), Value::from(value));
        self
    }

    /// Add a field with a boolean value
    pub fn bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Add a field with a null value
    pub fn null(mut self, key: &str) -> Self {
        self.fields.insert(key.to_string(), Value::Null);
        self
    }

    /// Add a field with an object value
    pub fn object(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Add a field with an array value
    pub fn array(mut self, key: &str, value: Vec<Value>) -> Self {
        self.fields.insert(key.to_string(), Value::Array(value));
        self
    }

    /// Build the record as a map
    pub fn build_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Build the record as a JSON object
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate test data with various patterns
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// Mixed request payload exercising every typed accessor
    pub fn request_payload() -> Map<String, Value> {
        RecordBuilder::new()
            .int("int_1", 0)
            .int("int_2", 1)
            .string("int_3", "0")
            .string("int_4", "1")
            .string("string_1", "alksjdfoij323")
            .string("string_2", "")
            .string("string_3", "666")
            .string("string_4", "12.3")
            .bool("bool_1", true)
            .bool("bool_2", false)
            .float("float_1", 0.0)
            .float("float_2", 1.1)
            .string("date_1", "2020-01-01")
            .string("date_2", "2020-13-56")
            .string("datetime_1", "2000-01-01 00:00:00")
            .string("datetime_2", "1919-01-01 00:90:00")
            .int("timestamp_1", 1_611_217_459)
            .array("array_1", vec![Value::from(34), Value::from(565), Value::from(13)])
            .build_map()
    }

    /// Request payload with a nested object and a nested list
    pub fn nested_payload() -> Map<String, Value> {
        let address = RecordBuilder::new()
            .string("city", "Lisbon")
            .string("zip", "1100-148")
            .int("floor", 3)
            .build();

        RecordBuilder::new()
            .string("name", "Ana")
            .object("address", address)
            .array("scores", vec![Value::from(7), Value::from("9")])
            .build_map()
    }

    /// HTTP-style headers with mixed key casing
    pub fn header_records() -> Vec<(String, Value)> {
        vec![
            ("Content-Type".to_string(), Value::from("application/json")),
            ("Accept".to_string(), Value::from("*/*")),
            ("X-Request-Id".to_string(), Value::from("abc-123")),
            ("Content-Length".to_string(), Value::from(348)),
        ]
    }

    /// Values on both sides of the accepted timestamp range
    pub fn timestamp_boundaries() -> Vec<(i64, bool)> {
        vec![
            (i64::MIN, false),
            (-1, false),
            (0, true),
            (1_611_150_603, true),
            (2_147_483_647, true),
            (2_147_483_648, false),
            (i64::MAX, false),
        ]
    }
}

/// Install a test-friendly `tracing` subscriber.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// JSON assertions with a pointer to the first difference
pub mod assertions {
    use serde_json::Value;

    /// JSON pointer of the first place where `actual` and `expected` differ
    pub fn first_difference(actual: &Value, expected: &Value) -> Option<String> {
        diff_at(actual, expected, String::new())
    }

    fn diff_at(actual: &Value, expected: &Value, path: String) -> Option<String> {
        match (actual, expected) {
            (Value::Object(a), Value::Object(e)) => {
                for (key, expected_value) in e {
                    let here = format!("{path}/{key}");
                    match a.get(key) {
                        Some(actual_value) => {
                            if let Some(found) = diff_at(actual_value, expected_value, here) {
                                return Some(found);
                            }
                        }
                        None => return Some(here),
                    }
                }
                a.keys()
                    .find(|key| !e.contains_key(*key))
                    .map(|key| format!("{path}/{key}"))
            }
            (Value::Array(a), Value::Array(e)) if a.len() == e.len() => a
                .iter()
                .zip(e)
                .enumerate()
                .find_map(|(idx, (x, y))| diff_at(x, y, format!("{path}/{idx}"))),
            _ if actual == expected => None,
            _ if path.is_empty() => Some("/".to_string()),
            _ => Some(path),
        }
    }

    /// Assert that two JSON values are equal, naming the first differing path
    pub fn assert_json_eq(actual: &Value, expected: &Value, context: &str) {
        if let Some(path) = first_difference(actual, expected) {
            panic!("{context}: JSON differs at `{path}`\n  expected: {expected}\n  actual:   {actual}");
        }
    }
}
