//! # Document Model
//!
//! The in-memory form of a decoded YAML config or manifest.
//!
//! YAML mappings decode into one of two variants depending on the load
//! strategy:
//!
//! - [`Document::Mapping`]: a sorted `BTreeMap`. Source key order is lost.
//! - [`Document::OrderedMapping`]: an [`OrderedMap`] whose iteration order
//!   is the order keys appear in the source file.
//!
//! Schema checks run against the JSON projection from [`Document::to_json`],
//! which is identical for both variants.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// A decoded YAML value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Document {
    /// `~`, `null`, or an empty document.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer or finite float scalar.
    Number(Number),
    /// A string scalar.
    String(String),
    /// A YAML sequence.
    Sequence(Vec<Document>),
    /// A mapping decoded without order preservation.
    Mapping(BTreeMap<String, Document>),
    /// A mapping whose iteration order matches the source document.
    OrderedMapping(OrderedMap),
}

impl Document {
    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Returns true for either mapping variant.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Document::Mapping(_) | Document::OrderedMapping(_))
    }

    /// Returns true only for an order-preserving mapping.
    pub fn is_ordered_mapping(&self) -> bool {
        matches!(self, Document::OrderedMapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_ordered_mapping(&self) -> Option<&OrderedMap> {
        match self {
            Document::OrderedMapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` in either mapping variant.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Mapping(map) => map.get(key),
            Document::OrderedMapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Mapping keys in iteration order: sorted for plain mappings, source
    /// order for ordered mappings. `None` for non-mappings.
    pub fn keys(&self) -> Option<Vec<&str>> {
        match self {
            Document::Mapping(map) => Some(map.keys().map(String::as_str).collect()),
            Document::OrderedMapping(map) => Some(map.keys().collect()),
            _ => None,
        }
    }

    /// Short YAML-ish name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "boolean",
            Document::Number(_) => "number",
            Document::String(_) => "string",
            Document::Sequence(_) => "sequence",
            Document::Mapping(_) | Document::OrderedMapping(_) => "mapping",
        }
    }

    /// Project the document onto a `serde_json::Value` for schema checking.
    pub fn to_json(&self) -> Value {
        match self {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(*b),
            Document::Number(n) => Value::Number(n.clone()),
            Document::String(s) => Value::String(s.clone()),
            Document::Sequence(items) => {
                Value::Array(items.iter().map(Document::to_json).collect())
            }
            Document::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Document::OrderedMapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Build a document from a JSON value. Objects become plain mappings.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(*b),
            Value::Number(n) => Document::Number(n.clone()),
            Value::String(s) => Document::String(s.clone()),
            Value::Array(items) => {
                Document::Sequence(items.iter().map(Document::from_json).collect())
            }
            Value::Object(map) => Document::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Document::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Recursively convert every plain mapping into an ordered mapping.
    ///
    /// Plain mappings are sorted, so the resulting key order is sorted too.
    pub fn into_ordered(self) -> Self {
        match self {
            Document::Sequence(items) => {
                Document::Sequence(items.into_iter().map(Document::into_ordered).collect())
            }
            Document::Mapping(map) => Document::OrderedMapping(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_ordered()))
                    .collect(),
            ),
            Document::OrderedMapping(map) => Document::OrderedMapping(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_ordered()))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Document::Number(Number::from(n))
    }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
    fn from(items: Vec<T>) -> Self {
        Document::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<OrderedMap> for Document {
    fn from(map: OrderedMap) -> Self {
        Document::OrderedMapping(map)
    }
}

/// A string-keyed map that iterates in insertion order.
///
/// Entries live in a `Vec`; lookups are linear, which is fine for config
/// files. Re-inserting an existing key replaces its value in place and keeps
/// the original position. Equality is order-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMap {
    entries: Vec<(String, Document)>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace `key`. Returns the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Document)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for OrderedMap {
    type Item = (String, Document);
    type IntoIter = std::vec::IntoIter<(String, Document)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for OrderedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
