//! Ordered key/value store with case-insensitive lookup
//!
//! Entries live in a single [`IndexMap`] keyed by the normalized key (the
//! lower-cased key when insensitivity is on). Each entry keeps the key as it
//! was last written, so lookups work for any casing while exports reproduce
//! the caller's spelling.

use crate::access::Access;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use sift_format::cast::{cast_or, Cast};
use sift_format::{Result, SiftError};
use std::borrow::Cow;
use std::mem;
use std::ops::Index;
use tracing::{trace, warn};

static NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: Value,
}

/// Ordered key/value collection with case-insensitive lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub(crate) entries: IndexMap<String, Entry>,
    insensitive: bool,
    access: Access,
}

impl Collection {
    /// Create an empty, case-insensitive collection
    pub fn new() -> Self {
        Self::with_insensitive(true)
    }

    /// Create an empty collection, choosing whether lookups ignore case
    pub fn with_insensitive(insensitive: bool) -> Self {
        Self {
            entries: IndexMap::new(),
            insensitive,
            access: Access::ReadWrite,
        }
    }

    /// Create a collection holding `data`
    pub fn from_map(data: Map<String, Value>, insensitive: bool) -> Self {
        let mut collection = Self::with_insensitive(insensitive);
        collection.init(data);
        collection
    }

    /// Create a read-only collection holding `data`
    pub fn read_only(data: Map<String, Value>, insensitive: bool) -> Self {
        Self::from_map(data, insensitive).freeze()
    }

    /// Turn this collection into a read-only one
    pub fn freeze(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    /// Whether mutations are rejected
    pub fn is_read_only(&self) -> bool {
        self.access == Access::ReadOnly
    }

    /// Whether lookups ignore case
    pub fn is_insensitive(&self) -> bool {
        self.insensitive
    }

    /// Load `data` into the collection.
    ///
    /// This is the construction path and ignores the access mode, so it also
    /// fills read-only collections.
    pub fn init<I>(&mut self, data: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in data {
            self.store(key, value);
        }
    }

    fn normalize<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if self.insensitive {
            Cow::Owned(key.to_lowercase())
        } else {
            Cow::Borrowed(key)
        }
    }

    fn store(&mut self, key: String, value: Value) -> Option<Value> {
        let normalized = self.normalize(&key).into_owned();
        match self.entries.get_mut(&normalized) {
            Some(entry) => {
                entry.key = key;
                Some(mem::replace(&mut entry.value, value))
            }
            None => {
                self.entries.insert(normalized, Entry { key, value });
                None
            }
        }
    }

    fn ensure_writable(&self, key: &str, operation: &'static str) -> Result<()> {
        match self.access {
            Access::ReadWrite => Ok(()),
            Access::ReadOnly => {
                warn!(key, operation, "rejected mutation of read-only collection");
                Err(SiftError::ReadOnlyViolation {
                    key: key.to_string(),
                    operation,
                })
            }
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_writable("", "clear")?;
        self.entries.clear();
        Ok(())
    }

    /// Whether `key` (in any casing, when insensitive) is stored
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(&*self.normalize(key))
    }

    /// Stored value for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .get(&*self.normalize(key))
            .map(|entry| &entry.value)
    }

    /// Stored value for `key`, or `default` when absent
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        cast_or(self.get(key), default, None)
    }

    /// Stored value for `key` coerced with `cast`, or `default` (not cast) when absent
    pub fn get_cast(&self, key: &str, default: impl Into<Value>, cast: Cast) -> Value {
        cast_or(self.get(key), default, Some(cast))
    }

    /// Store `value` under `key`, returning the value it replaced.
    ///
    /// When insensitive, a key differing only in case replaces the existing
    /// entry in place and the new spelling becomes the exported key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        self.ensure_writable(&key, "set")?;
        trace!(key = %key, "collection set");
        Ok(self.store(key, value.into()))
    }

    /// Remove `key`, returning the stored value if there was one
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        self.ensure_writable(key, "remove")?;
        let normalized = self.normalize(key);
        let removed = self
            .entries
            .shift_remove(&*normalized)
            .map(|entry| entry.value);
        trace!(key, removed = removed.is_some(), "collection remove");
        Ok(removed)
    }

    /// Keys in insertion order: normalized when `insensitive`, as written otherwise
    pub fn keys(&self, insensitive: bool) -> Vec<&str> {
        if insensitive {
            self.entries.keys().map(String::as_str).collect()
        } else {
            self.entries.values().map(|entry| entry.key.as_str()).collect()
        }
    }

    /// Values in insertion order
    pub fn values(&self) -> Vec<&Value> {
        self.entries.values().map(|entry| &entry.value).collect()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.values(),
        }
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for Collection {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_map(data, true)
    }
}

impl FromIterator<(String, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.init(iter);
        collection
    }
}

impl Index<&str> for Collection {
    type Output = Value;

    /// Stored value, or `Value::Null` when absent
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Iterator over the entries of a [`Collection`]
pub struct Iter<'a> {
    inner: indexmap::map::Values<'a, String, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
