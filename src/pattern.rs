//! Pattern tables and dotted-path lookup
//!
//! Tables deserialize from any serde format. Strings and nested mappings
//! are kept, numbers and booleans become their string form, and TOML
//! datetimes become their RFC 3339 text. Sequences and nulls are rejected.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Map key under which `toml` hands a datetime to non-TOML visitors
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// A pattern string or a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternValue {
    Pattern(String),
    Table(PatternTable),
}

/// All key -> pattern entries of one locale, nested to any depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PatternTable(BTreeMap<String, PatternValue>);

struct PatternValueVisitor;

impl<'de> Visitor<'de> for PatternValueVisitor {
    type Value = PatternValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a pattern string or a nested table")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<PatternValue, E> {
        Ok(PatternValue::Pattern(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PatternValue, A::Error> {
        let mut entries = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == TOML_DATETIME_KEY && entries.is_empty() {
                let datetime: String = map.next_value()?;
                return Ok(PatternValue::Pattern(datetime));
            }
            let value: PatternValue = map.next_value()?;
            entries.insert(key, value);
        }

        Ok(PatternValue::Table(PatternTable(entries)))
    }
}

impl<'de> Deserialize<'de> for PatternValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PatternValueVisitor)
    }
}

/// A borrowed lookup result: either a pattern or a whole sub-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Pattern(&'a str),
    Table(&'a PatternTable),
}

impl<'a> Entry<'a> {
    /// The pattern string, if this entry is not a table.
    pub fn as_pattern(&self) -> Option<&'a str> {
        match *self {
            Entry::Pattern(p) => Some(p),
            Entry::Table(_) => None,
        }
    }

    /// The sub-table, if this entry is not a pattern.
    pub fn as_table(&self) -> Option<&'a PatternTable> {
        match *self {
            Entry::Table(t) => Some(t),
            Entry::Pattern(_) => None,
        }
    }
}

impl<'a> From<&'a PatternValue> for Entry<'a> {
    fn from(value: &'a PatternValue) -> Self {
        match value {
            PatternValue::Pattern(p) => Entry::Pattern(p),
            PatternValue::Table(t) => Entry::Table(t),
        }
    }
}

impl From<&str> for PatternValue {
    fn from(pattern: &str) -> Self {
        PatternValue::Pattern(pattern.to_string())
    }
}

impl From<String> for PatternValue {
    fn from(pattern: String) -> Self {
        PatternValue::Pattern(pattern)
    }
}

impl From<PatternTable> for PatternValue {
    fn from(table: PatternTable) -> Self {
        PatternValue::Table(table)
    }
}

impl PatternTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry stored under exactly `key`; no dotted traversal.
    pub fn get(&self, key: &str) -> Option<&PatternValue> {
        self.0.get(key)
    }

    /// Store a pattern or sub-table, returning the previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PatternValue>) -> Option<PatternValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up `key`, descending through nested tables on `.`.
    ///
    /// See [`resolve_dotted_path`].
    pub fn resolve(&self, key: &str) -> Option<Entry<'_>> {
        resolve_dotted_path(self, Some(key))
    }
}

impl<K: Into<String>, V: Into<PatternValue>> FromIterator<(K, V)> for PatternTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PatternTable(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Resolve a dotted-path key against `table`.
///
/// - `None` returns the whole table.
/// - A key present verbatim wins, even if it contains dots.
/// - Otherwise the key is split on `.` and each segment descends one
///   level. A missing segment, or a pattern where a table is needed,
///   yields `None`.
pub fn resolve_dotted_path<'a>(table: &'a PatternTable, key: Option<&str>) -> Option<Entry<'a>> {
    let Some(key) = key else {
        return Some(Entry::Table(table));
    };

    if let Some(value) = table.get(key) {
        return Some(value.into());
    }

    let mut current = Entry::Table(table);
    for segment in key.split('.') {
        let value = current.as_table()?.get(segment)?;
        current = value.into();
    }

    Some(current)
}

/// [`resolve_dotted_path`] with a default for misses.
pub fn resolve_dotted_path_or<'a>(table: &'a PatternTable, key: Option<&str>, default: Entry<'a>) -> Entry<'a> {
    resolve_dotted_path(table, key).unwrap_or(default)
}

/// [`resolve_dotted_path`] with a default computed only on a miss.
pub fn resolve_dotted_path_or_else<'a, F>(table: &'a PatternTable, key: Option<&str>, default: F) -> Entry<'a>
where
    F: FnOnce() -> Entry<'a>,
{
    resolve_dotted_path(table, key).unwrap_or_else(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample() -> PatternTable {
        let errors: PatternTable = [("not_found", "{name} not found"), ("denied", "access denied")]
            .into_iter()
            .collect();
        let mut table = PatternTable::new();
        table.insert("greeting", "hello {name}");
        table.insert("errors", errors);
        table.insert("a.b", "literal dotted");
        table
    }

    #[test]
    fn test_none_key_returns_whole_table() {
        let table = sample();
        assert_eq!(resolve_dotted_path(&table, None), Some(Entry::Table(&table)));
    }

    #[test]
    fn test_nested_lookup() {
        let table = sample();
        assert_eq!(table.resolve("errors.not_found"), Some(Entry::Pattern("{name} not found")));
        assert_eq!(table.resolve("greeting"), Some(Entry::Pattern("hello {name}")));
        assert!(table.resolve("errors").and_then(|e| e.as_table()).is_some());
    }

    #[test]
    fn test_exact_key_wins_over_traversal() {
        let mut table = sample();
        let nested: PatternTable = [("b", "nested")].into_iter().collect();
        table.insert("a", nested);
        assert_eq!(table.resolve("a.b"), Some(Entry::Pattern("literal dotted")));
    }

    #[test]
    fn test_descending_into_pattern_misses() {
        let table = sample();
        assert_eq!(table.resolve("greeting.name"), None);
        assert_eq!(table.resolve("errors.not_found.deeper"), None);
        assert_eq!(table.resolve("missing.key"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_deserialize_coerces_scalars() {
        let table: PatternTable = serde_json::from_str(r#"{"code": 404, "ratio": 0.5, "ok": true, "a": {"b": "x"}}"#).unwrap();
        assert_eq!(table.resolve("code"), Some(Entry::Pattern("404")));
        assert_eq!(table.resolve("ratio"), Some(Entry::Pattern("0.5")));
        assert_eq!(table.resolve("ok"), Some(Entry::Pattern("true")));
        assert_eq!(table.resolve("a.b"), Some(Entry::Pattern("x")));
    }

    #[test]
    fn test_deserialize_rejects_sequences_and_null() {
        assert!(serde_json::from_str::<PatternTable>(r#"{"list": ["a"]}"#).is_err());
        assert!(serde_json::from_str::<PatternTable>(r#"{"none": null}"#).is_err());
        assert!(serde_json::from_str::<PatternTable>(r#""just a string""#).is_err());
    }

    #[test]
    fn test_toml_datetime_becomes_text() {
        let table: PatternTable = toml::from_str("released = 1979-05-27T07:32:00Z\n[meta]\nday = 1979-05-27\n").unwrap();
        assert_eq!(table.resolve("released"), Some(Entry::Pattern("1979-05-27T07:32:00Z")));
        assert_eq!(table.resolve("meta.day"), Some(Entry::Pattern("1979-05-27")));
    }

    #[test]
    fn test_default_is_lazy() {
        let table = sample();
        let calls = Cell::new(0);
        let fallback = || {
            calls.set(calls.get() + 1);
            Entry::Pattern("fallback")
        };

        let hit = resolve_dotted_path_or_else(&table, Some("greeting"), fallback);
        assert_eq!(hit, Entry::Pattern("hello {name}"));
        assert_eq!(calls.get(), 0);

        let miss = resolve_dotted_path_or_else(&table, Some("greeting.x"), || {
            calls.set(calls.get() + 1);
            Entry::Pattern("fallback")
        });
        assert_eq!(miss, Entry::Pattern("fallback"));
        assert_eq!(calls.get(), 1);

        assert_eq!(
            resolve_dotted_path_or(&table, Some("nope"), Entry::Pattern("d")),
            Entry::Pattern("d")
        );
    }
}
