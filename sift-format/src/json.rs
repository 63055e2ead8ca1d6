//! JSON encode/decode with typed errors
//!
//! Thin layer over `serde_json` that adds nesting limits and the escaping
//! switches in [`JsonOptions`]. Every failure surfaces as a [`SiftError`]
//! instead of a sentinel return value.

use crate::constants;
use crate::error::{Result, SiftError};
use crate::limits::Limits;
use bitflags::bitflags;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Value};
use std::io;
use tracing::trace;

bitflags! {
    /// Output switches for [`encode`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JsonOptions: u32 {
        /// Escape `<` and `>`
        const HEX_TAG = constants::JSON_HEX_TAG;
        /// Escape `&`
        const HEX_AMP = constants::JSON_HEX_AMP;
        /// Escape `'`
        const HEX_APOS = constants::JSON_HEX_APOS;
        /// Escape `"` with a unicode escape instead of `\"`
        const HEX_QUOT = constants::JSON_HEX_QUOT;
        /// Write arrays as objects keyed by index
        const FORCE_OBJECT = constants::JSON_FORCE_OBJECT;
        /// Leave `/` unescaped
        const UNESCAPED_SLASHES = constants::JSON_UNESCAPED_SLASHES;
        /// Indent with four spaces
        const PRETTY_PRINT = constants::JSON_PRETTY_PRINT;
        /// Write non-ASCII characters verbatim
        const UNESCAPED_UNICODE = constants::JSON_UNESCAPED_UNICODE;
    }
}

impl JsonOptions {
    /// Options used when exporting collections (79)
    pub const COLLECTION_DEFAULT: JsonOptions = JsonOptions::HEX_TAG
        .union(JsonOptions::HEX_AMP)
        .union(JsonOptions::HEX_APOS)
        .union(JsonOptions::HEX_QUOT)
        .union(JsonOptions::UNESCAPED_SLASHES);
}

/// Formatter that applies the string escaping rules of [`JsonOptions`] and
/// delegates layout to `F`.
struct EscapingFormatter<F> {
    inner: F,
    options: JsonOptions,
}

fn write_unit_escape<W>(writer: &mut W, unit: u16, uppercase: bool) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    if uppercase {
        write!(writer, "\\u{:04X}", unit)
    } else {
        write!(writer, "\\u{:04x}", unit)
    }
}

impl<F> EscapingFormatter<F> {
    fn escape_for(&self, c: char) -> Option<Escape> {
        match c {
            '/' if !self.options.contains(JsonOptions::UNESCAPED_SLASHES) => Some(Escape::Solidus),
            '<' | '>' if self.options.contains(JsonOptions::HEX_TAG) => Some(Escape::Hex),
            '&' if self.options.contains(JsonOptions::HEX_AMP) => Some(Escape::Hex),
            '\'' if self.options.contains(JsonOptions::HEX_APOS) => Some(Escape::Hex),
            c if !c.is_ascii() && !self.options.contains(JsonOptions::UNESCAPED_UNICODE) => {
                Some(Escape::Utf16)
            }
            _ => None,
        }
    }
}

enum Escape {
    Solidus,
    Hex,
    Utf16,
}

impl<F: Formatter> Formatter for EscapingFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, c) in fragment.char_indices() {
            let Some(escape) = self.escape_for(c) else {
                continue;
            };
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            match escape {
                Escape::Solidus => writer.write_all(b"\\/")?,
                Escape::Hex => write_unit_escape(writer, c as u16, true)?,
                Escape::Utf16 => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        write_unit_escape(writer, *unit, false)?;
                    }
                }
            }
            start = idx + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote if self.options.contains(JsonOptions::HEX_QUOT) => {
                write_unit_escape(writer, u16::from(b'"'), true)
            }
            other => self.inner.write_char_escape(writer, other),
        }
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Container nesting depth: scalars are 0, `[1]` is 1, `[[1]]` is 2
pub fn depth_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}

fn check_depth(value: &Value, limits: &Limits) -> Result<()> {
    let depth = depth_of(value);
    if depth > limits.max_depth {
        return Err(SiftError::DepthExceeded {
            depth,
            max_depth: limits.max_depth,
        });
    }
    Ok(())
}

fn force_object(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), force_object(item)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, force_object(item)))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn write_with<F: Formatter>(value: &Value, inner: F, options: JsonOptions) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let formatter = EscapingFormatter { inner, options };
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| SiftError::Json(serde::ser::Error::custom(e)))
}

/// Encode `value` with the default [`Limits`]
pub fn encode<T: Serialize + ?Sized>(value: &T, options: JsonOptions) -> Result<String> {
    encode_with(value, options, &Limits::default())
}

/// Encode `value` with explicit limits
pub fn encode_with<T: Serialize + ?Sized>(
    value: &T,
    options: JsonOptions,
    limits: &Limits,
) -> Result<String> {
    limits.validate()?;

    let mut tree = serde_json::to_value(value)?;
    check_depth(&tree, limits)?;

    if options.contains(JsonOptions::FORCE_OBJECT) {
        tree = force_object(tree);
    }

    let encoded = if options.contains(JsonOptions::PRETTY_PRINT) {
        write_with(&tree, PrettyFormatter::with_indent(b"    "), options)?
    } else {
        write_with(&tree, CompactFormatter, options)?
    };

    trace!(bytes = encoded.len(), options = options.bits(), "encoded JSON");
    Ok(encoded)
}

/// Decode a JSON document with the default [`Limits`]
pub fn decode(data: &str) -> Result<Value> {
    decode_with(data, &Limits::default())
}

/// Decode a JSON document with explicit limits
pub fn decode_with(data: &str, limits: &Limits) -> Result<Value> {
    limits.validate()?;

    let value: Value = serde_json::from_str(data)?;
    check_depth(&value, limits)?;

    trace!(bytes = data.len(), "decoded JSON");
    Ok(value)
}

/// Decode a JSON document into `T`
pub fn decode_as<T: DeserializeOwned>(data: &str) -> Result<T> {
    let value = decode(data)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn hex(c: char) -> String {
        format!("\\u{:04X}", c as u32)
    }

    #[test]
    fn test_encode_plain() {
        let value = json!({"one": "two", "0": "three"});
        assert_eq!(
            encode(&value, JsonOptions::empty()).unwrap(),
            r#"{"one":"two","0":"three"}"#
        );
    }

    #[test]
    fn test_encode_escapes_slashes_by_default() {
        let value = json!("a/b");
        assert_eq!(encode(&value, JsonOptions::empty()).unwrap(), r#""a\/b""#);
        assert_eq!(
            encode(&value, JsonOptions::UNESCAPED_SLASHES).unwrap(),
            r#""a/b""#
        );
    }

    #[test]
    fn test_collection_default_hex_escapes() {
        let encoded = encode(&json!("<a href='x'>&\"</a>"), JsonOptions::COLLECTION_DEFAULT).unwrap();
        let expected = format!(
            "\"{lt}a href={apos}x{apos}{gt}{amp}{quot}{lt}/a{gt}\"",
            lt = hex('<'),
            gt = hex('>'),
            apos = hex('\''),
            amp = hex('&'),
            quot = hex('"'),
        );
        assert_eq!(encoded, expected);
        assert_eq!(JsonOptions::COLLECTION_DEFAULT.bits(), 79);
    }

    #[test]
    fn test_unicode_escaping() {
        let value = json!("é🚀");
        assert_eq!(
            encode(&value, JsonOptions::empty()).unwrap(),
            format!("\"{}{}{}\"", "\\u00e9", "\\ud83d", "\\ude80")
        );
        assert_eq!(
            encode(&value, JsonOptions::UNESCAPED_UNICODE).unwrap(),
            "\"é🚀\""
        );
    }

    #[test]
    fn test_force_object() {
        let value = json!({"list": [1, [2]]});
        assert_eq!(
            encode(&value, JsonOptions::FORCE_OBJECT).unwrap(),
            r#"{"list":{"0":1,"1":{"0":2}}}"#
        );
    }

    #[test]
    fn test_pretty_print_uses_four_spaces() {
        let value = json!({"a": [1]});
        assert_eq!(
            encode(&value, JsonOptions::PRETTY_PRINT).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_encode_rejects_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(
            encode(&map, JsonOptions::empty()),
            Err(SiftError::Json(_))
        ));
    }

    #[test]
    fn test_depth_limits() {
        let value = json!([[1]]);
        assert_eq!(depth_of(&value), 2);
        assert!(encode_with(&value, JsonOptions::empty(), &Limits::with_depth(2)).is_ok());
        assert!(matches!(
            encode_with(&value, JsonOptions::empty(), &Limits::with_depth(1)),
            Err(SiftError::DepthExceeded { depth: 2, max_depth: 1 })
        ));
        assert!(matches!(
            decode_with("[[1]]", &Limits::with_depth(1)),
            Err(SiftError::DepthExceeded { .. })
        ));
        assert!(matches!(
            decode_with("1", &Limits::with_depth(0)),
            Err(SiftError::InvalidDepth)
        ));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(""), Err(SiftError::Json(_))));
        assert!(matches!(decode("{\"a\":"), Err(SiftError::Json(_))));
        assert!(matches!(decode("[1,]"), Err(SiftError::Json(_))));
    }

    #[test]
    fn test_decode_keeps_key_order() {
        let value = decode(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_decode_escaped_output() {
        let original = json!({"path": "/a/<b>", "name": "Zoë", "quote": "\"'&"});
        let encoded = encode(&original, JsonOptions::COLLECTION_DEFAULT).unwrap();
        assert_eq!(decode(&encoded).unwrap(), original);
    }

    #[test]
    fn test_decode_as() {
        let pairs: Vec<(String, i64)> = decode_as(r#"[["a", 1], ["b", 2]]"#).unwrap();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert!(decode_as::<Vec<i64>>(r#"["x"]"#).is_err());
    }
}
