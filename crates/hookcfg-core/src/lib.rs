//! # hookcfg-core: Foundational Types for hookcfg
//!
//! This crate defines the value model that every hookcfg config and manifest
//! is decoded into, plus the two collaborators the validator factory in
//! `hookcfg-schema` consumes: YAML load strategies and repository-root
//! resolution.
//!
//! ## Key Design Principles
//!
//! 1. **One document type.** [`Document`] is the single in-memory form of a
//!    decoded YAML file. Plain mappings and order-preserving mappings are
//!    separate variants, so callers can tell which load strategy produced a
//!    value by matching on it.
//!
//! 2. **Strategies are plain functions.** A [`LoadStrategy`] is a
//!    `fn(&str) -> Result<Document, DecodeError>`; [`plain_load`] and
//!    [`ordered_load`] are the two provided implementations.
//!
//! 3. **Repository root is a capability.** [`RepositoryRoot`] abstracts the
//!    `git rev-parse --show-toplevel` lookup so embedders and tests can pin
//!    the root with [`FixedRoot`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hookcfg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod git;
pub mod yaml;

// Re-export primary types for ergonomic imports.
pub use document::{Document, OrderedMap};
pub use error::{DecodeError, GitError};
pub use git::{FixedRoot, GitRepository, RepositoryRoot};
pub use yaml::{ordered_load, plain_load, LoadStrategy};
