//! # Schema Defaults
//!
//! Fill in omitted keys from the `default` values declared in a schema's
//! `properties`. Recursion follows `properties` into mapping values and
//! `items` into sequence elements. Keys already present are never touched.
//!
//! Ordered mappings stay ordered: defaults are appended after the existing
//! keys, in the schema's (sorted) property order.

use hookcfg_core::Document;
use serde_json::Value;

/// Return a copy of `document` with schema defaults applied.
pub fn apply_defaults(document: &Document, schema: &Value) -> Document {
    let mut out = document.clone();
    fill_defaults(&mut out, schema);
    out
}

fn fill_defaults(document: &mut Document, schema: &Value) {
    match document {
        Document::Sequence(items) => {
            if let Some(item_schema) = schema.get("items") {
                for item in items {
                    fill_defaults(item, item_schema);
                }
            }
        }
        Document::Mapping(map) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (key, property) in properties {
                if !map.contains_key(key) {
                    if let Some(default) = property.get("default") {
                        map.insert(key.clone(), Document::from_json(default));
                    }
                }
                if let Some(child) = map.get_mut(key) {
                    fill_defaults(child, property);
                }
            }
        }
        Document::OrderedMapping(map) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (key, property) in properties {
                if !map.contains_key(key) {
                    if let Some(default) = property.get("default") {
                        map.insert(key.clone(), Document::from_json(default).into_ordered());
                    }
                }
                if let Some(child) = map.get_mut(key) {
                    fill_defaults(child, property);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookcfg_core::{ordered_load, plain_load};
    use serde_json::json;

    fn hook_schema() -> Value {
        json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "args": {"type": "array", "default": []},
                    "language_version": {"type": "string", "default": "default"}
                }
            }
        })
    }

    #[test]
    fn fills_missing_keys_in_items() {
        let doc = plain_load("- id: flake8\n").unwrap();
        let filled = apply_defaults(&doc, &hook_schema());
        assert_eq!(
            filled.to_json(),
            json!([{"id": "flake8", "args": [], "language_version": "default"}])
        );
    }

    #[test]
    fn keeps_present_values() {
        let doc = plain_load("- id: flake8\n  args: [--max-line-length=100]\n").unwrap();
        let filled = apply_defaults(&doc, &hook_schema());
        assert_eq!(filled.to_json()[0]["args"], json!(["--max-line-length=100"]));
    }

    #[test]
    fn ordered_mappings_append_defaults() {
        let doc = ordered_load("- language_version: python3\n  id: flake8\n").unwrap();
        let filled = apply_defaults(&doc, &hook_schema());
        let hook = &filled.as_sequence().unwrap()[0];
        assert!(hook.is_ordered_mapping());
        assert_eq!(hook.keys().unwrap(), vec!["language_version", "id", "args"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let doc = plain_load("- id: flake8\n").unwrap();
        let _ = apply_defaults(&doc, &hook_schema());
        assert_eq!(doc.to_json(), json!([{"id": "flake8"}]));
    }

    #[test]
    fn nested_defaults_apply_inside_defaulted_objects() {
        let schema = json!({
            "type": "object",
            "properties": {
                "outer": {
                    "type": "object",
                    "default": {},
                    "properties": {"inner": {"default": 3}}
                }
            }
        });
        let filled = apply_defaults(&plain_load("{}").unwrap(), &schema);
        assert_eq!(filled.to_json(), json!({"outer": {"inner": 3}}));
    }

    #[test]
    fn scalars_pass_through() {
        let doc = Document::from("text");
        assert_eq!(apply_defaults(&doc, &hook_schema()), doc);
    }
}
