//! # Hook Manifest Validation
//!
//! Validator for a hook repository's `hooks.yaml`, which declares the hooks
//! the repository provides. On top of the schema, each hook's `language`
//! must be a supported one and its `files` pattern must compile.

use std::path::Path;

use hookcfg_core::{ordered_load, Document};
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::defaults::apply_defaults;
use crate::loader::{ConfigValidator, LoadError, ValidatorSpec};
use crate::validate::SchemaError;

/// Default manifest location, relative to the repository root.
pub const MANIFEST_FILE: &str = "hooks.yaml";

/// Languages a hook may be written in.
pub const LANGUAGES: &[&str] = &["node", "python", "ruby", "script", "system"];

/// Invalid `hooks.yaml`.
#[derive(Error, Debug)]
pub enum InvalidManifestError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(
        "hook '{hook_id}' uses language '{language}'; expected one of {}",
        LANGUAGES.join(", ")
    )]
    UnknownLanguage { hook_id: String, language: String },

    #[error("invalid files regex {pattern:?} for hook '{hook_id}': {source}")]
    InvalidPattern {
        hook_id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// The manifest schema.
pub fn manifest_schema() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "object",
            "properties": {
                "id": {"type": "string"},
                "name": {"type": "string"},
                "description": {"type": "string", "default": ""},
                "entry": {"type": "string"},
                "language": {"type": "string"},
                "language_version": {"type": "string", "default": "default"},
                "files": {"type": "string"},
                "expected_return_value": {"type": "number", "default": 0},
                "args": {
                    "type": "array",
                    "default": [],
                    "items": {"type": "string"}
                }
            },
            "required": ["id", "name", "entry", "language", "files"]
        }
    })
}

/// Check every hook's language and `files` pattern.
///
/// # Errors
///
/// Returns the first [`InvalidManifestError::UnknownLanguage`] or
/// [`InvalidManifestError::InvalidPattern`] found, in hook order.
pub fn additional_manifest_check(manifest: &Document) -> Result<(), InvalidManifestError> {
    for hook in manifest.as_sequence().unwrap_or_default() {
        let hook_id = hook.get("id").and_then(Document::as_str).unwrap_or_default();

        let language = hook.get("language").and_then(Document::as_str).unwrap_or_default();
        if !LANGUAGES.contains(&language) {
            return Err(InvalidManifestError::UnknownLanguage {
                hook_id: hook_id.to_string(),
                language: language.to_string(),
            });
        }

        if let Some(pattern) = hook.get("files").and_then(Document::as_str) {
            Regex::new(pattern).map_err(|source| InvalidManifestError::InvalidPattern {
                hook_id: hook_id.to_string(),
                pattern: pattern.to_string(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Validator for [`MANIFEST_FILE`] rooted at the current git toplevel.
///
/// # Errors
///
/// Returns [`SchemaError`] if the built-in schema fails to compile.
pub fn manifest_validator() -> Result<ConfigValidator<InvalidManifestError>, SchemaError> {
    ValidatorSpec::new(MANIFEST_FILE, manifest_schema())
        .with_additional_check(additional_manifest_check)
        .build()
}

/// Validate a manifest with order preserved and fill in schema defaults.
///
/// # Errors
///
/// Returns whatever [`ConfigValidator::validate_with`] returns.
pub fn load_manifest(
    validator: &ConfigValidator<InvalidManifestError>,
    path: Option<&Path>,
) -> Result<Document, InvalidManifestError> {
    let manifest = validator.validate_with(path, ordered_load)?;
    Ok(apply_defaults(&manifest, validator.schema()))
}
