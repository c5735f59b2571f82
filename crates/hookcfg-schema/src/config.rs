//! # Hook Config Validation
//!
//! Validator for a project's `.pre-commit-config.yaml`: the list of hook
//! repositories and, for each, the hooks to run.
//!
//! ```yaml
//! -   repo: https://github.com/example/hooks
//!     sha: 4f3b1c2
//!     hooks:
//!     -   id: trailing-whitespace
//!         files: \.py$
//! ```
//!
//! Beyond the schema, every `files` and `exclude` value must compile as a
//! regular expression.

use std::path::Path;

use hookcfg_core::{ordered_load, Document};
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::defaults::apply_defaults;
use crate::loader::{ConfigValidator, LoadError, ValidatorSpec};
use crate::validate::SchemaError;

/// Default config location, relative to the repository root.
pub const CONFIG_FILE: &str = ".pre-commit-config.yaml";

/// Invalid `.pre-commit-config.yaml`.
#[derive(Error, Debug)]
pub enum InvalidConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A `files`/`exclude` value is not a valid regex.
    #[error("invalid {field} regex {pattern:?} for hook '{hook_id}' in repo '{repo}': {source}")]
    InvalidPattern {
        repo: String,
        hook_id: String,
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// The config schema.
pub fn config_schema() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "object",
            "properties": {
                "repo": {"type": "string"},
                "sha": {"type": "string"},
                "hooks": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "files": {"type": "string"},
                            "exclude": {"type": "string", "default": "^$"},
                            "args": {
                                "type": "array",
                                "default": [],
                                "items": {"type": "string"}
                            }
                        },
                        "required": ["id"]
                    }
                }
            },
            "required": ["repo", "sha", "hooks"]
        }
    })
}

/// Check that every hook's `files` and `exclude` patterns compile.
///
/// # Errors
///
/// Returns [`InvalidConfigError::InvalidPattern`] for the first bad pattern.
pub fn validate_config_extra(config: &Document) -> Result<(), InvalidConfigError> {
    for repo in config.as_sequence().unwrap_or_default() {
        let repo_url = repo.get("repo").and_then(Document::as_str).unwrap_or_default();
        for hook in repo
            .get("hooks")
            .and_then(Document::as_sequence)
            .unwrap_or_default()
        {
            let hook_id = hook.get("id").and_then(Document::as_str).unwrap_or_default();
            for field in ["files", "exclude"] {
                let Some(pattern) = hook.get(field).and_then(Document::as_str) else {
                    continue;
                };
                Regex::new(pattern).map_err(|source| InvalidConfigError::InvalidPattern {
                    repo: repo_url.to_string(),
                    hook_id: hook_id.to_string(),
                    field,
                    pattern: pattern.to_string(),
                    source,
                })?;
            }
        }
    }
    Ok(())
}

/// Validator for [`CONFIG_FILE`] rooted at the current git toplevel.
///
/// # Errors
///
/// Returns [`SchemaError`] if the built-in schema fails to compile.
pub fn config_validator() -> Result<ConfigValidator<InvalidConfigError>, SchemaError> {
    ValidatorSpec::new(CONFIG_FILE, config_schema())
        .with_additional_check(validate_config_extra)
        .build()
}

/// Validate a config with order preserved and fill in schema defaults.
///
/// # Errors
///
/// Returns whatever [`ConfigValidator::validate_with`] returns.
pub fn load_config(
    validator: &ConfigValidator<InvalidConfigError>,
    path: Option<&Path>,
) -> Result<Document, InvalidConfigError> {
    let config = validator.validate_with(path, ordered_load)?;
    Ok(apply_defaults(&config, validator.schema()))
}
