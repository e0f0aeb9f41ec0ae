//! Placeholder substitution
//!
//! Patterns carry `{name}` placeholders. Substitution is a literal token
//! replace done in one pass over the pattern: substituted values are never
//! scanned again, so a value containing `{other}` comes out verbatim.

use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use tracing::warn;

/// Placeholder name used when a single value is supplied
pub const POSITIONAL_KEY: &str = "0";

/// Values to substitute into a pattern, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatData(BTreeMap<String, String>);

impl FormatData {
    /// Empty data; patterns come back unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single value, bound to the `{0}` placeholder.
    pub fn single(value: impl Display) -> Self {
        Self::new().arg(POSITIONAL_KEY, value)
    }

    /// Builder-style insert.
    pub fn arg(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the value for `name`, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) -> Option<String> {
        self.0.insert(name.into(), value.to_string())
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of bound placeholder names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for FormatData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormatData::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for FormatData {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> From<Vec<(K, V)>> for FormatData {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> From<HashMap<K, V>> for FormatData {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> From<BTreeMap<K, V>> for FormatData {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl From<&str> for FormatData {
    fn from(value: &str) -> Self {
        FormatData::single(value)
    }
}

impl From<String> for FormatData {
    fn from(value: String) -> Self {
        FormatData::single(value)
    }
}

/// Replace every `{name}` token in `pattern` whose name is in `data`.
///
/// All `{name}` tokens are matched in a single left-to-right pass, the
/// longest token winning where two start at the same place. Placeholders
/// without a value are left as written, and values without a placeholder
/// are ignored.
pub fn format(pattern: &str, data: &FormatData) -> String {
    if data.is_empty() {
        return pattern.to_string();
    }

    let tokens: Vec<String> = data.0.keys().map(|name| format!("{{{name}}}")).collect();
    let values: Vec<&str> = data.0.values().map(String::as_str).collect();

    let matcher = match AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&tokens)
    {
        Ok(matcher) => matcher,
        Err(e) => {
            warn!(error = %e, placeholders = tokens.len(), "failed to build placeholder matcher");
            return pattern.to_string();
        }
    };

    matcher.replace_all(pattern, &values)
}
