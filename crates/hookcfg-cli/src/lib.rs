//! # hookcfg-cli: Command-Line Interface
//!
//! Provides the `hookcfg` binary:
//!
//! ```bash
//! hookcfg validate-config                      # <repo root>/.pre-commit-config.yaml
//! hookcfg validate-config a.yaml b.yaml
//! hookcfg -v validate-manifest hooks.yaml
//! ```
//!
//! Argument parsing lives in `main.rs`; handlers here delegate to
//! `hookcfg-schema` and only format results.

pub mod validate;
