//! JSON export and text serialization for collections

use crate::collection::Collection;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use sift_format::json::{self, JsonOptions};
use sift_format::{Result, SiftError, ValueKind};

impl Collection {
    /// Entries as a plain map, keyed by their latest spelling
    pub fn to_array(&self) -> Map<String, Value> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Entries as a JSON object value
    pub fn json_serialize(&self) -> Value {
        Value::Object(self.to_array())
    }

    /// Encode the entries as JSON.
    ///
    /// [`JsonOptions::COLLECTION_DEFAULT`] escapes HTML-sensitive characters
    /// and leaves slashes alone.
    pub fn to_json(&self, options: JsonOptions) -> Result<String> {
        json::encode(self, options)
    }

    /// Compact text form that [`Collection::unserialize`] reads back
    pub fn serialize(&self) -> Result<String> {
        json::encode(
            self,
            JsonOptions::UNESCAPED_SLASHES | JsonOptions::UNESCAPED_UNICODE,
        )
    }

    /// Replace the entries with those of a [`Collection::serialize`] payload.
    ///
    /// Existing entries are dropped first. Like [`Collection::init`] this is a
    /// construction path and also works on read-only collections.
    pub fn unserialize(&mut self, serialized: &str) -> Result<()> {
        let data = match json::decode(serialized)? {
            Value::Object(map) => map,
            other => {
                return Err(SiftError::TypeMismatch {
                    key: "$".to_string(),
                    expected: ValueKind::Object.name(),
                    value: other,
                })
            }
        };
        self.entries.clear();
        self.init(data);
        Ok(())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Collection::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Collection {
        Collection::from(
            json!({"Name": "Zoë", "Path": "/a/b", "tags": ["x", "y"]})
                .as_object()
                .unwrap()
                .clone(),
        )
    }

    #[test]
    fn test_to_array_uses_latest_spelling() {
        let mut collection = sample();
        collection.set("NAME", "Ann").unwrap();
        let array = collection.to_array();
        let keys: Vec<&String> = array.keys().collect();
        assert_eq!(keys, vec!["NAME", "Path", "tags"]);
        assert_eq!(array["NAME"], json!("Ann"));
    }

    #[test]
    fn test_to_json_options() {
        let collection = sample();
        assert_eq!(
            collection.to_json(JsonOptions::UNESCAPED_SLASHES | JsonOptions::UNESCAPED_UNICODE).unwrap(),
            r#"{"Name":"Zoë","Path":"/a/b","tags":["x","y"]}"#
        );
        assert_eq!(
            collection.to_json(JsonOptions::COLLECTION_DEFAULT).unwrap(),
            format!(r#"{{"Name":"Zo{}","Path":"/a/b","tags":["x","y"]}}"#, "\\u00eb")
        );
    }

    #[test]
    fn test_serialize_roundtrip_replaces_entries() {
        let original = sample();
        let payload = original.serialize().unwrap();

        let mut restored = Collection::new();
        restored.set("stale", true).unwrap();
        restored.unserialize(&payload).unwrap();

        assert!(!restored.has("stale"));
        assert_eq!(restored.to_array(), original.to_array());
        assert_eq!(restored.get("name"), Some(&json!("Zoë")));
    }

    #[test]
    fn test_unserialize_fills_read_only() {
        let mut collection = Collection::read_only(Map::new(), true);
        collection.unserialize(r#"{"A": 1}"#).unwrap();
        assert_eq!(collection.get("a"), Some(&json!(1)));
        assert!(collection.set("b", 2).is_err());
    }

    #[test]
    fn test_unserialize_rejects_non_objects() {
        let mut collection = Collection::new();
        assert!(matches!(
            collection.unserialize("[1, 2]"),
            Err(SiftError::TypeMismatch { expected: "object", .. })
        ));
        assert!(matches!(
            collection.unserialize("{"),
            Err(SiftError::Json(_))
        ));
    }

    #[test]
    fn test_serde_impls() {
        let collection = sample();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value, collection.json_serialize());

        let back: Collection = serde_json::from_value(value).unwrap();
        assert!(back.is_insensitive());
        assert_eq!(back.get("PATH"), Some(&json!("/a/b")));
    }
}
