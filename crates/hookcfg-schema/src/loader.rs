//! # Validator Factory
//!
//! Builds reusable config validators from a default path, a schema, a
//! caller-chosen error type, and an optional additional check.
//!
//! ## Error Kind
//!
//! The caller picks the error type `E` of a [`ConfigValidator<E>`]. The only
//! requirement is `E: From<LoadError>`: every path, read, decode, and schema
//! failure is a [`LoadError`] turned into `E` on the way out, so callers
//! handle one type. The additional check already returns `E`, and whatever
//! it returns is passed through as-is, letting callers keep domain-specific
//! failures in their own variants.
//!
//! ## Load Strategy
//!
//! The decode strategy is chosen per call ([`ConfigValidator::validate_with`]),
//! so one validator serves both plain and order-preserving loads.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hookcfg_core::{
    plain_load, DecodeError, Document, GitError, GitRepository, LoadStrategy, RepositoryRoot,
};
use serde_json::Value;
use thiserror::Error;

use crate::validate::{SchemaError, SchemaValidator, ValidationViolations};

/// Extra validation run on a document that passed the schema check.
pub type AdditionalCheck<E> = Box<dyn Fn(&Document) -> Result<(), E> + Send + Sync>;

/// A failure before the additional check runs.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No path was given and the repository root could not be resolved.
    #[error("cannot resolve default path: {0}")]
    RepositoryRoot(#[from] GitError),

    /// The file does not exist or cannot be read.
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        /// Path that was opened.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a decodable YAML document.
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        /// Path whose contents failed to decode.
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The decoded document does not conform to the schema.
    #[error("{} does not match the schema: {}", .path.display(), .violations.summary())]
    SchemaViolation {
        /// Path of the offending document.
        path: PathBuf,
        /// Every violation reported by the schema check.
        violations: ValidationViolations,
    },
}

impl LoadError {
    /// The file path involved, if the failure got as far as resolving one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LoadError::RepositoryRoot(_) => None,
            LoadError::FileAccess { path, .. }
            | LoadError::Decode { path, .. }
            | LoadError::SchemaViolation { path, .. } => Some(path),
        }
    }
}

/// Everything needed to build a [`ConfigValidator`].
pub struct ValidatorSpec<E> {
    default_path: PathBuf,
    schema: Value,
    additional: Option<AdditionalCheck<E>>,
    root: Arc<dyn RepositoryRoot>,
}

impl<E> ValidatorSpec<E>
where
    E: From<LoadError>,
{
    /// A spec with no additional check that resolves the default path
    /// against the git toplevel of the current directory.
    pub fn new(default_path: impl Into<PathBuf>, schema: Value) -> Self {
        Self {
            default_path: default_path.into(),
            schema,
            additional: None,
            root: Arc::new(GitRepository::new()),
        }
    }

    pub fn with_additional_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Document) -> Result<(), E> + Send + Sync + 'static,
    {
        self.additional = Some(Box::new(check));
        self
    }

    pub fn with_repository_root<R>(mut self, root: R) -> Self
    where
        R: RepositoryRoot + 'static,
    {
        self.root = Arc::new(root);
        self
    }

    /// Compile the schema and produce the validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema does not compile.
    pub fn build(self) -> Result<ConfigValidator<E>, SchemaError> {
        Ok(ConfigValidator {
            default_path: self.default_path,
            schema: SchemaValidator::new(self.schema)?,
            additional: self.additional,
            root: self.root,
        })
    }
}

/// Build a validator that resolves its default path against the git
/// toplevel of the current directory.
///
/// # Errors
///
/// Returns [`SchemaError`] if `schema` does not compile.
pub fn get_validator<E>(
    default_path: impl Into<PathBuf>,
    schema: Value,
    additional_validation_strategy: Option<AdditionalCheck<E>>,
) -> Result<ConfigValidator<E>, SchemaError>
where
    E: From<LoadError>,
{
    let mut spec = ValidatorSpec::new(default_path, schema);
    spec.additional = additional_validation_strategy;
    spec.build()
}

/// A reusable, stateless config validator.
pub struct ConfigValidator<E> {
    default_path: PathBuf,
    schema: SchemaValidator,
    additional: Option<AdditionalCheck<E>>,
    root: Arc<dyn RepositoryRoot>,
}

impl<E> ConfigValidator<E>
where
    E: From<LoadError>,
{
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn schema(&self) -> &Value {
        self.schema.schema()
    }

    /// The path a call with `path` would read.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::RepositoryRoot`] when `path` is `None` and the
    /// repository root cannot be resolved.
    pub fn resolve_path(&self, path: Option<&Path>) -> Result<PathBuf, LoadError> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(self.root.root()?.join(&self.default_path)),
        }
    }

    /// Load and validate with [`plain_load`].
    ///
    /// # Errors
    ///
    /// See [`validate_with`](Self::validate_with).
    pub fn validate(&self, path: Option<&Path>) -> Result<Document, E> {
        self.validate_with(path, plain_load)
    }

    /// Load `path` (or the default path) with `load`, check it against the
    /// schema, run the additional check, and return the decoded document.
    ///
    /// # Errors
    ///
    /// Returns `E::from(LoadError)` for path, read, decode, and schema
    /// failures, and the additional check's own error unchanged.
    pub fn validate_with(&self, path: Option<&Path>, load: LoadStrategy) -> Result<Document, E> {
        let document = self.load(path, load)?;
        if let Some(check) = &self.additional {
            check(&document)?;
        }
        Ok(document)
    }

    fn load(&self, path: Option<&Path>, load: LoadStrategy) -> Result<Document, LoadError> {
        let path = self.resolve_path(path)?;
        tracing::debug!(path = %path.display(), "loading config");

        let content = std::fs::read_to_string(&path).map_err(|source| LoadError::FileAccess {
            path: path.clone(),
            source,
        })?;

        let document = load(&content).map_err(|source| LoadError::Decode {
            path: path.clone(),
            source,
        })?;

        self.schema
            .check(&document.to_json())
            .map_err(|violations| LoadError::SchemaViolation {
                path: path.clone(),
                violations,
            })?;

        tracing::debug!(
            path = %path.display(),
            kind = document.type_name(),
            "config passed schema check"
        );
        Ok(document)
    }
}

impl<E> fmt::Debug for ConfigValidator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigValidator")
            .field("default_path", &self.default_path)
            .field("schema", &self.schema)
            .field("additional", &self.additional.is_some())
            .finish_non_exhaustive()
    }
}
