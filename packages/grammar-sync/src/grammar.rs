//! Grammar descriptors
//!
//! A grammar is identified by its name. Everything else (repository, clone URL,
//! subdirectory, submodules, generation) has a default derived from the name,
//! so `Grammar::new("rust")` is a complete descriptor.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SyncError};

/// Files copied from `<clone>/<path>/src/` into `parsers/<name>/`, in order.
pub const INCLUDED_FILES: &[&str] = &[
    "grammar.json",
    "parser.c",
    "scanner.c",
    "scanner.cc",
    "node-types.json",
    "tag.h",
];

/// Prefix of upstream grammar repositories
pub const REPO_PREFIX: &str = "tree-sitter-";

/// Static description of one grammar to sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grammar {
    /// Grammar name, also the output directory name
    pub name: String,

    /// Repository name under the remote (default: `tree-sitter-<name>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Full clone URL, bypassing the remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Directory inside the clone holding `grammar.js` and `src/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Run `git submodule update --init` after clone/update
    #[serde(default)]
    pub submodules: bool,

    /// Run the parser generator before copying
    #[serde(default)]
    pub generate: bool,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repo: None,
            url: None,
            path: None,
            submodules: false,
            generate: false,
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_submodules(mut self, submodules: bool) -> Self {
        self.submodules = submodules;
        self
    }

    pub fn with_generate(mut self, generate: bool) -> Self {
        self.generate = generate;
        self
    }

    /// Repository name, which is also the scratch directory name
    pub fn repo_name(&self) -> String {
        self.repo
            .clone()
            .unwrap_or_else(|| format!("{}{}", REPO_PREFIX, self.name))
    }

    pub fn clone_url(&self, remote: &str) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => join_remote(remote, &self.repo_name()),
        }
    }

    pub fn clone_dir(&self, scratch: &Path) -> PathBuf {
        scratch.join(self.repo_name())
    }

    /// Directory the generator runs in
    pub fn grammar_dir(&self, scratch: &Path) -> PathBuf {
        let clone = self.clone_dir(scratch);
        match &self.path {
            Some(path) => clone.join(path),
            None => clone,
        }
    }

    /// Directory the included files are copied from
    pub fn source_dir(&self, scratch: &Path) -> PathBuf {
        self.grammar_dir(scratch).join("src")
    }

    pub fn output_dir(&self, parsers: &Path) -> PathBuf {
        parsers.join(&self.name)
    }

    /// Names become directory names, so reject anything that could escape
    /// the output root.
    pub fn validate(&self) -> Result<()> {
        validate_name("grammar name", &self.name)?;
        if let Some(repo) = &self.repo {
            validate_name("repository name", repo)?;
        }
        if let Some(path) = &self.path {
            validate_subpath(&format!("Grammar '{}'", self.name), path)?;
        }
        Ok(())
    }
}

/// Join a remote base (`https://github.com/tree-sitter/`, `/srv/mirrors`) and a
/// repository name.
pub fn join_remote(remote: &str, repo: &str) -> String {
    if remote.ends_with('/') {
        format!("{}{}", remote, repo)
    } else {
        format!("{}/{}", remote, repo)
    }
}

pub(crate) fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SyncError::config(format!("Empty {}", what)));
    }
    if name == "." || name == ".." || name.contains(|c: char| c == '/' || c == '\\') {
        return Err(SyncError::config(format!(
            "Invalid {} '{}': must be a single path component",
            what, name
        )));
    }
    Ok(())
}

/// A directory inside a clone: relative, never climbing out of it
pub(crate) fn validate_subpath(owner: &str, path: &Path) -> Result<()> {
    if path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(SyncError::config(format!(
            "{}: path '{}' must be relative to the clone",
            owner,
            path.display()
        )));
    }
    Ok(())
}
