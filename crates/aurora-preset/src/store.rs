//! Case-insensitive key/value storage with typed accessors.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::numeric::{format_float, parse_float_prefix, parse_int_prefix};

/// Raw key/value pairs of a preset, one entry per line of the file.
///
/// Keys are case-insensitive: every key is lower-cased (ASCII only) on insert
/// and lookup. Values keep their original content and casing.
///
/// The typed getters never fail. A missing key, or a value that does not start
/// with a number, yields the supplied default. Trailing text after a number is
/// ignored, so `"1.0 // comment"` reads as `1.0`.
///
/// Values read from bytes that are not valid UTF-8 are presented as Latin-1
/// text and remember their original bytes, which [`get_bytes`](Self::get_bytes)
/// returns for writing. Any setter replaces the stored bytes.
///
/// # Example
///
/// ```rust
/// use aurora_preset::ValueStore;
///
/// let mut store = ValueStore::new();
/// store.set_string("Zoom", "0.5 ; slow");
///
/// assert_eq!(store.get_float("zoom", 1.0), 0.5);
/// assert_eq!(store.get_float("rot", 0.25), 0.25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueStore {
    values: BTreeMap<String, String>,
    /// Original bytes of values that are not valid UTF-8.
    raw: BTreeMap<String, Vec<u8>>,
}

/// Lower-cases a key the way the format expects (ASCII letters only).
pub fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// Decodes bytes as UTF-8, falling back to Latin-1 for legacy ANSI text.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

impl ValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.values.clear();
        self.raw.clear();
    }

    /// Returns the text of a value, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    /// Returns the bytes of a value as they would be written to a file.
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        let key = normalize_key(key);
        self.raw
            .get(&key)
            .map(Vec::as_slice)
            .or_else(|| self.values.get(&key).map(String::as_bytes))
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(&normalize_key(key))
    }

    /// Remove a key, returning its raw value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = normalize_key(key);
        self.raw.remove(&key);
        self.values.remove(&key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert a pair only if the key is not yet present.
    ///
    /// Used while parsing: the first occurrence of a key in a file wins.
    /// Returns true if the pair was inserted.
    pub fn insert_first(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.entry(normalize_key(key)) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Like [`insert_first`](Self::insert_first), for a value in its file
    /// encoding.
    pub fn insert_first_bytes(&mut self, key: &str, value: &[u8]) -> bool {
        let key = normalize_key(key);
        if self.values.contains_key(&key) {
            return false;
        }
        self.store_bytes(key, value);
        true
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.values.retain(|k, v| keep(k, v));
        let values = &self.values;
        self.raw.retain(|k, _| values.contains_key(k));
    }

    /// Returns the value as an integer, or `default` if missing or unparsable.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).and_then(parse_int_prefix).unwrap_or(default)
    }

    /// Returns the value as a float, or `default` if missing or unparsable.
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get(key).and_then(parse_float_prefix).unwrap_or(default)
    }

    /// Returns true if the value parses as an integer greater than zero.
    ///
    /// A missing or unparsable value falls back to `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_int(key, i32::from(default)) > 0
    }

    /// Returns the raw value, or `default` if the key is missing.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Set an integer value, replacing any previous value.
    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set_string(key, value.to_string());
    }

    /// Set a float value with six fixed decimals.
    pub fn set_float(&mut self, key: &str, value: f32) {
        self.set_string(key, format_float(value));
    }

    /// Set a boolean value as `1` or `0`.
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set_string(key, if value { "1" } else { "0" });
    }

    /// Set a raw string value.
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        let key = normalize_key(key);
        self.raw.remove(&key);
        self.values.insert(key, value.into());
    }

    /// Set a value from bytes in their file encoding.
    ///
    /// Bytes that are not valid UTF-8 are kept as they are for writing.
    pub fn set_bytes(&mut self, key: &str, value: &[u8]) {
        self.store_bytes(normalize_key(key), value);
    }

    fn store_bytes(&mut self, key: String, value: &[u8]) {
        match decode_text(value) {
            Cow::Borrowed(text) => {
                self.raw.remove(&key);
                self.values.insert(key, text.to_string());
            }
            Cow::Owned(text) => {
                self.raw.insert(key.clone(), value.to_vec());
                self.values.insert(key, text);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ValueStore {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
