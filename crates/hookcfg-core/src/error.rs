//! # Error Types
//!
//! Errors raised by the core collaborators. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! - Decode errors cover both malformed YAML and well-formed YAML that has
//!   no [`Document`](crate::Document) representation.
//! - Git errors distinguish "could not run git" from "not inside a
//!   repository".

use thiserror::Error;

/// Error decoding YAML text into a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The text is not parseable as a single YAML document.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A mapping key is not a string, number, or boolean.
    #[error("unsupported YAML mapping key: {0}")]
    UnsupportedKey(String),

    /// Two keys of one mapping have the same string form, e.g. `1` and `"1"`.
    #[error("duplicate mapping key after stringification: {0}")]
    DuplicateKey(String),

    /// A float that has no JSON representation (`.nan`, `.inf`).
    #[error("cannot represent float {0} in a document")]
    NonFiniteFloat(f64),

    /// A number that fits none of i64, u64, or f64.
    #[error("unsupported YAML number: {0}")]
    UnsupportedNumber(String),
}

/// Error resolving the repository root.
#[derive(Error, Debug)]
pub enum GitError {
    /// The `git` executable could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// `git rev-parse --show-toplevel` exited non-zero.
    #[error("not inside a git repository: {stderr}")]
    NotARepository {
        /// Trimmed stderr reported by git.
        stderr: String,
    },

    /// git printed a toplevel path that is not valid UTF-8.
    #[error("git printed a non-UTF-8 repository root: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}
