//! # hookcfg-schema: Schema-Checked Config Loading
//!
//! Turns a YAML file on disk into a validated [`Document`](hookcfg_core::Document).
//!
//! ## Validator Factory (`loader`)
//!
//! [`ValidatorSpec`] bundles a default path, a JSON Schema, an optional
//! additional check, and a repository-root resolver. Building it yields a
//! reusable [`ConfigValidator`] whose `validate`/`validate_with` run the
//! pipeline:
//!
//! 1. resolve the path (default: `<repo root>/<default path>`),
//! 2. read the file,
//! 3. decode it with the chosen load strategy,
//! 4. check it against the schema,
//! 5. run the additional check.
//!
//! Failures in steps 1 to 4 are [`LoadError`]s converted into the caller's error
//! type `E` via `From<LoadError>`. Errors from step 5 are already `E` and are
//! returned untouched.
//!
//! ## Hook Files (`config`, `manifest`)
//!
//! Ready-made validators for a project's `.pre-commit-config.yaml` and a
//! hook repository's `hooks.yaml`, each with its own schema, pattern checks,
//! and error type.
//!
//! ## Crate Policy
//!
//! - Depends only on `hookcfg-core` internally.
//! - Schemas are compiled once per validator; a schema that does not compile
//!   is a construction error, never a per-call error.

pub mod config;
pub mod defaults;
pub mod loader;
pub mod manifest;
pub mod validate;

pub use config::{config_validator, load_config, InvalidConfigError, CONFIG_FILE};
pub use defaults::apply_defaults;
pub use loader::{get_validator, AdditionalCheck, ConfigValidator, LoadError, ValidatorSpec};
pub use manifest::{
    load_manifest, manifest_validator, InvalidManifestError, LANGUAGES, MANIFEST_FILE,
};
pub use validate::{SchemaError, SchemaValidator, ValidationViolations, Violation};
