//! Scratch clone management
//!
//! Network operations shell out to the `git` CLI through a [`CommandRunner`];
//! read-only inspection of a clone (is it a repository, what is HEAD) goes
//! through libgit2.

use std::path::Path;

use git2::Repository;

use crate::errors::{Result, SyncError};
use crate::process::{CommandRunner, CommandSpec};

/// What `clone_or_update` did to the scratch clone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneAction {
    Cloned,
    Updated,
}

/// Thin wrapper over the `git` CLI
pub struct GitClient<R> {
    runner: R,
}

impl<R: CommandRunner> GitClient<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Clone `url` into `target` when absent; otherwise discard local changes
    /// and pull. With `submodules`, initialise submodules afterwards.
    pub fn clone_or_update(&self, url: &str, target: &Path, submodules: bool) -> Result<CloneAction> {
        let action = if target.exists() {
            self.runner
                .run(&CommandSpec::new("git", ["reset", "--hard", "HEAD"]).in_dir(target))?;
            self.runner
                .run(&CommandSpec::new("git", ["pull"]).in_dir(target))?;
            CloneAction::Updated
        } else {
            let target_arg = target.to_str().ok_or_else(|| {
                SyncError::config(format!("Non UTF-8 scratch path: {}", target.display()))
            })?;
            self.runner
                .run(&CommandSpec::new("git", ["clone", url, target_arg]))?;
            CloneAction::Cloned
        };

        if submodules {
            self.runner
                .run(&CommandSpec::new("git", ["submodule", "update", "--init"]).in_dir(target))?;
        }

        Ok(action)
    }
}

/// HEAD commit id of the clone at `path`, `None` when it is not a repository
/// or has no commits yet.
pub fn head_revision(path: &Path) -> Option<String> {
    let repo = Repository::open(path).ok()?;
    let head = repo.head().ok()?;
    let commit = head.peel_to_commit().ok()?;
    Some(commit.id().to_string())
}

/// Fail unless `path` holds a git repository
pub fn ensure_repository(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SyncError::missing_clone(path));
    }
    Repository::open(path).map_err(|e| {
        SyncError::git(format!("{} is not a git repository: {}", path.display(), e.message()))
            .with_source(e)
    })?;
    Ok(())
}
