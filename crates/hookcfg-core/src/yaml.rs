//! # YAML Load Strategies
//!
//! Decode YAML text into a [`Document`]. Two interchangeable strategies are
//! provided and selected per call by the validator:
//!
//! - [`plain_load`]: mappings become [`Document::Mapping`].
//! - [`ordered_load`]: mappings become [`Document::OrderedMapping`] with
//!   keys in source order, at every nesting level.
//!
//! ## Conversion Rules
//!
//! Config files use the JSON-compatible subset of YAML, so decoding goes
//! through `serde_yaml::Value` and is narrowed as follows:
//!
//! 1. Tags are ignored; the tagged inner value is kept.
//! 2. Mapping keys that are strings, numbers, or booleans are stringified.
//!    Any other key is [`DecodeError::UnsupportedKey`], and two keys that
//!    stringify alike (`1` and `"1"`) are [`DecodeError::DuplicateKey`].
//! 3. Non-finite floats are [`DecodeError::NonFiniteFloat`].
//! 4. Whitespace-only text decodes to [`Document::Null`].

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde_json::Number;
use serde_yaml::Value as Yaml;

use crate::document::{Document, OrderedMap};
use crate::error::DecodeError;

/// A pluggable YAML decoder.
pub type LoadStrategy = fn(&str) -> Result<Document, DecodeError>;

/// Decode without preserving mapping order.
pub fn plain_load(text: &str) -> Result<Document, DecodeError> {
    decode(text, false)
}

/// Decode preserving mapping order.
pub fn ordered_load(text: &str) -> Result<Document, DecodeError> {
    decode(text, true)
}

fn decode(text: &str, ordered: bool) -> Result<Document, DecodeError> {
    if text.trim().is_empty() {
        return Ok(Document::Null);
    }
    let value: Yaml = serde_yaml::from_str(text)?;
    convert(value, ordered)
}

fn convert(value: Yaml, ordered: bool) -> Result<Document, DecodeError> {
    match value {
        Yaml::Null => Ok(Document::Null),
        Yaml::Bool(b) => Ok(Document::Bool(b)),
        Yaml::Number(n) => convert_number(&n).map(Document::Number),
        Yaml::String(s) => Ok(Document::String(s)),
        Yaml::Sequence(seq) => {
            let items: Result<Vec<Document>, DecodeError> =
                seq.into_iter().map(|v| convert(v, ordered)).collect();
            Ok(Document::Sequence(items?))
        }
        Yaml::Mapping(map) if ordered => {
            let mut out = OrderedMap::with_capacity(map.len());
            for (k, v) in map {
                let key = key_string(k)?;
                if out.contains_key(&key) {
                    return Err(DecodeError::DuplicateKey(key));
                }
                out.insert(key, convert(v, ordered)?);
            }
            Ok(Document::OrderedMapping(out))
        }
        Yaml::Mapping(map) => {
            let mut out = BTreeMap::new();
            for (k, v) in map {
                match out.entry(key_string(k)?) {
                    Entry::Occupied(entry) => {
                        return Err(DecodeError::DuplicateKey(entry.key().clone()));
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(convert(v, ordered)?);
                    }
                }
            }
            Ok(Document::Mapping(out))
        }
        Yaml::Tagged(tagged) => convert(tagged.value, ordered),
    }
}

fn convert_number(n: &serde_yaml::Number) -> Result<Number, DecodeError> {
    if let Some(i) = n.as_i64() {
        Ok(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::from(u))
    } else if let Some(f) = n.as_f64() {
        Number::from_f64(f).ok_or(DecodeError::NonFiniteFloat(f))
    } else {
        Err(DecodeError::UnsupportedNumber(n.to_string()))
    }
}

fn key_string(key: Yaml) -> Result<String, DecodeError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => key_string(tagged.value),
        other => Err(DecodeError::UnsupportedKey(format!("{other:?}"))),
    }
}
