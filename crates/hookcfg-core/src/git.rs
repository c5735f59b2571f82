//! # Repository Root Resolution
//!
//! Validators build their default config path from the repository root.
//! [`RepositoryRoot`] is the seam; [`GitRepository`] asks git, and
//! [`FixedRoot`] pins a directory for embedders and tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::GitError;

/// Capability returning the base directory of the managed repository.
pub trait RepositoryRoot: Send + Sync {
    /// Resolve the repository root.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] when the root cannot be determined, e.g. when
    /// invoked outside a repository.
    fn root(&self) -> Result<PathBuf, GitError>;
}

/// Resolves the root with `git rev-parse --show-toplevel`.
#[derive(Debug, Clone, Default)]
pub struct GitRepository {
    work_dir: Option<PathBuf>,
}

impl GitRepository {
    /// Resolve relative to the process's current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative to `work_dir` instead of the current directory.
    pub fn at(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
        }
    }
}

impl RepositoryRoot for GitRepository {
    fn root(&self) -> Result<PathBuf, GitError> {
        let mut cmd = Command::new("git");
        cmd.args(["rev-parse", "--show-toplevel"]);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(GitError::Spawn)?;
        if !output.status.success() {
            return Err(GitError::NotARepository {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        let root = PathBuf::from(stdout.trim_end_matches(['\r', '\n']));
        tracing::trace!(root = %root.display(), "resolved git toplevel");
        Ok(root)
    }
}

/// A repository root fixed at construction.
#[derive(Debug, Clone)]
pub struct FixedRoot(PathBuf);

impl FixedRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl RepositoryRoot for FixedRoot {
    fn root(&self) -> Result<PathBuf, GitError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_root_returns_its_path() {
        let root = FixedRoot::new("/srv/project");
        assert_eq!(root.root().unwrap(), PathBuf::from("/srv/project"));
        assert_eq!(root.path(), Path::new("/srv/project"));
    }

    #[test]
    fn git_repository_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitRepository::at(dir.path()).root().unwrap_err();
        // Spawn when git is not installed, NotARepository otherwise.
        assert!(
            matches!(err, GitError::NotARepository { .. } | GitError::Spawn(_)),
            "got: {err}"
        );
    }

    #[test]
    fn git_repository_missing_work_dir_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = GitRepository::at(missing).root().unwrap_err();
        assert!(matches!(err, GitError::Spawn(_)), "got: {err}");
    }

    #[test]
    fn git_repository_finds_toplevel_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let Ok(status) = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(dir.path())
            .status()
        else {
            return; // git not installed
        };
        if !status.success() {
            return;
        }
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = GitRepository::at(&nested).root().unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
