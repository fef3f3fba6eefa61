//! Request parameter sets and gateway response bodies.

use std::collections::BTreeMap;

use crate::codec::form_decode;

/// Parsed `key=value&...` response body.
pub type ResponseMap = BTreeMap<String, String>;

/// Field name to value mapping for one request.
///
/// A value may be absent (`None`); absent values are never signed or sent.
/// A present empty string is a real value and is signed as `Key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    fields: BTreeMap<String, Option<String>>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs whose values may be absent.
    pub fn from_optional<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert_opt(key, value);
        }
        set
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), Some(value.into()));
    }

    /// Set a field that may be absent.
    pub fn insert_opt<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.fields.insert(key.into(), value.map(Into::into));
    }

    /// Set a field only when the caller has not supplied a present value.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let entry = self.fields.entry(key.into()).or_insert(None);
        if entry.is_none() {
            *entry = Some(value.into());
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Present value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// `true` if `key` has a present value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its present value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key).flatten()
    }

    /// Drop every absent entry.
    pub fn compact(&mut self) {
        self.fields.retain(|_, v| v.is_some());
    }

    /// Iterate over present entries in byte order of the key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Number of present entries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `f` to the present value of `key`.
    pub fn map_value(&mut self, key: &str, f: impl FnOnce(&str) -> String) {
        if let Some(Some(value)) = self.fields.get_mut(key) {
            *value = f(value);
        }
    }

    /// Present entries as owned pairs, ready for form encoding.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl From<ResponseMap> for ParameterSet {
    fn from(map: ResponseMap) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// Parse a `key1=value1&key2=value2` body.
///
/// Each segment is split on its first `=` only, so values may contain `=`.
/// Empty segments are skipped and a segment without `=` maps to an empty
/// value. Values are kept verbatim except for the keys in `decode_keys`,
/// which are form-decoded.
pub fn parse_response_body(body: &str, decode_keys: &[&str]) -> ResponseMap {
    body.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let value = if decode_keys.contains(&key) {
                form_decode(value)
            } else {
                value.to_string()
            };
            (key.to_string(), value)
        })
        .collect()
}
