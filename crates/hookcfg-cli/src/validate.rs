//! # Validate Subcommands
//!
//! `validate-config` and `validate-manifest`. Each takes zero or more
//! filenames; with none, the default file at the repository root is checked.
//! Every failing file gets one line on stdout and the exit code is 1.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use hookcfg_core::Document;
use hookcfg_schema::{config_validator, load_config, load_manifest, manifest_validator};

/// Arguments shared by both validate subcommands.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate. Defaults to the standard file at the repository root.
    pub filenames: Vec<PathBuf>,
}

/// Validate `.pre-commit-config.yaml` files.
pub fn run_validate_config(args: &ValidateArgs) -> anyhow::Result<u8> {
    let validator = config_validator()?;
    let mut stdout = std::io::stdout().lock();
    let status = check_files(&mut stdout, &args.filenames, |path| {
        load_config(&validator, path)
    })?;
    Ok(status)
}

/// Validate `hooks.yaml` manifests.
pub fn run_validate_manifest(args: &ValidateArgs) -> anyhow::Result<u8> {
    let validator = manifest_validator()?;
    let mut stdout = std::io::stdout().lock();
    let status = check_files(&mut stdout, &args.filenames, |path| {
        load_manifest(&validator, path)
    })?;
    Ok(status)
}

/// Run `validate` over each filename (or once with `None` when there are
/// none), writing one line per failure to `out`. Returns the exit status.
pub fn check_files<W, E, F>(
    out: &mut W,
    filenames: &[PathBuf],
    mut validate: F,
) -> std::io::Result<u8>
where
    W: Write,
    E: Display,
    F: FnMut(Option<&Path>) -> Result<Document, E>,
{
    let targets: Vec<Option<&Path>> = if filenames.is_empty() {
        vec![None]
    } else {
        filenames.iter().map(|p| Some(p.as_path())).collect()
    };

    let mut status = 0;
    for target in targets {
        let label = target.map_or_else(|| "<default>".to_string(), |p| p.display().to_string());
        match validate(target) {
            Ok(_) => tracing::info!(file = %label, "valid"),
            Err(e) => {
                tracing::warn!(file = %label, "validation failed");
                writeln!(out, "{}", single_line(&e))?;
                status = 1;
            }
        }
    }
    Ok(status)
}

/// `e` rendered with any embedded line breaks folded into `; `.
fn single_line(e: &impl Display) -> String {
    e.to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookcfg_schema::InvalidConfigError;

    const GOOD_CONFIG: &str = "- repo: r\n  sha: s\n  hooks:\n  - id: h\n";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn all_valid_files_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.yaml", GOOD_CONFIG);
        let validator = config_validator().unwrap();

        let mut out = Vec::new();
        let status = check_files(&mut out, &[good], |p| load_config(&validator, p)).unwrap();
        assert_eq!(status, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn any_invalid_file_exits_one_and_reports_it() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.yaml", GOOD_CONFIG);
        let missing = dir.path().join("missing.yaml");
        let validator = config_validator().unwrap();

        let mut out = Vec::new();
        let status =
            check_files(&mut out, &[good, missing], |p| load_config(&validator, p)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(status, 1);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("missing.yaml"), "got: {text}");
    }

    #[test]
    fn schema_violations_are_reported_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.yaml", "- repo: r\n  hooks: []\n");
        let validator = config_validator().unwrap();

        let mut out = Vec::new();
        let status = check_files(&mut out, &[bad], |p| load_config(&validator, p)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(status, 1);
        assert_eq!(text.lines().count(), 1, "got: {text}");
        assert!(text.contains("bad.yaml"), "got: {text}");
        assert!(text.contains("\"sha\""), "got: {text}");
    }

    #[test]
    fn multi_line_errors_are_folded() {
        let mut out = Vec::new();
        let status = check_files(&mut out, &[PathBuf::from("x.yaml")], |_| {
            Err::<Document, _>("first\n  second\n")
        })
        .unwrap();
        assert_eq!(status, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "first; second\n");
    }

    #[test]
    fn no_filenames_validates_default_once() {
        let mut calls = Vec::new();
        let mut out = Vec::new();
        let status = check_files(&mut out, &[], |p| {
            calls.push(p.map(Path::to_path_buf));
            Ok::<_, InvalidConfigError>(Document::Null)
        })
        .unwrap();
        assert_eq!(status, 0);
        assert_eq!(calls, vec![None]);
    }

    #[test]
    fn run_validate_manifest_rejects_unknown_language() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write(
            dir.path(),
            "hooks.yaml",
            "- id: h\n  name: h\n  entry: h\n  language: cobol\n  files: ''\n",
        );
        let args = ValidateArgs {
            filenames: vec![manifest],
        };
        assert_eq!(run_validate_manifest(&args).unwrap(), 1);
    }

    #[test]
    fn run_validate_config_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            filenames: vec![write(dir.path(), "c.yaml", GOOD_CONFIG)],
        };
        assert_eq!(run_validate_config(&args).unwrap(), 0);
    }
}
