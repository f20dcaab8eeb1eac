//! Sync configuration
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (`defaults.rs`)
//! 2. YAML manifest (`SyncConfig::from_yaml`)
//! 3. CLI flags, applied by the binary

pub mod defaults;
pub mod manifest;

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SyncError};
use crate::generate::Generator;
use crate::grammar::{join_remote, validate_name, validate_subpath, Grammar};
use defaults::{default_grammars, DEFAULT_REMOTE, RUNTIME_PATH, RUNTIME_REPO};
use manifest::{ManifestV1, SUPPORTED_VERSIONS};

/// What to do when a subprocess or copy fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the run on the first failure
    #[default]
    Strict,
    /// Log, record in the report, and keep going
    Lenient,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Strict => write!(f, "strict"),
            FailurePolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "lenient" => Ok(FailurePolicy::Lenient),
            _ => Err(SyncError::config(format!(
                "Invalid policy: {}. Use 'strict' or 'lenient'",
                s
            ))),
        }
    }
}

/// Directory layout of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Persistent clone cache, keyed by repository name
    pub scratch: PathBuf,
    /// Output tree, keyed by grammar name; replaced every run
    pub parsers: PathBuf,
    /// Vendored runtime; replaced every run
    pub runtime: PathBuf,
}

impl Layout {
    /// `scratch/`, `parsers/` and `tree-sitter/` under `root`
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            scratch: root.join("scratch"),
            parsers: root.join("parsers"),
            runtime: root.join("tree-sitter"),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::rooted(".")
    }
}

/// Where the runtime comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub enabled: bool,
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Subtree of the clone copied into the runtime directory
    pub path: PathBuf,
    pub submodules: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            repo: RUNTIME_REPO.to_string(),
            url: None,
            path: PathBuf::from(RUNTIME_PATH),
            submodules: false,
        }
    }
}

impl RuntimeConfig {
    /// The clone lives under the scratch directory and the subtree inside the
    /// clone, so neither may be path-like.
    pub fn validate(&self) -> Result<()> {
        validate_name("runtime repository name", &self.repo)?;
        validate_subpath("Runtime", &self.path)
    }

    pub fn clone_url(&self, remote: &str) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| join_remote(remote, &self.repo))
    }
}

/// Everything a run needs besides the layout and per-run flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub remote: String,
    pub policy: FailurePolicy,
    pub generator: Generator,
    pub runtime: RuntimeConfig,
    pub grammars: Vec<Grammar>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            policy: FailurePolicy::default(),
            generator: Generator::default(),
            runtime: RuntimeConfig::default(),
            grammars: default_grammars(),
        }
    }
}

impl SyncConfig {
    /// Load and validate a v1 manifest
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::config(format!("Failed to read manifest {}: {}", path.display(), e))
                .with_source(e)
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let manifest: ManifestV1 = serde_yaml::from_str(content)?;

        match manifest.version {
            None => {
                return Err(SyncError::config(
                    "Missing 'version' field in manifest. Add 'version: 1' to the top of the file.",
                ))
            }
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(SyncError::config(format!(
                    "Unsupported manifest version {}. Supported versions: {}",
                    v,
                    SUPPORTED_VERSIONS
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
            Some(_) => {}
        }

        let defaults = Self::default();
        let config = Self {
            remote: manifest.remote.unwrap_or(defaults.remote),
            policy: manifest.policy.unwrap_or(defaults.policy),
            generator: manifest.generator.unwrap_or(defaults.generator),
            runtime: manifest.runtime.unwrap_or(defaults.runtime),
            grammars: manifest.grammars.into_iter().map(Grammar::from).collect(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(SyncError::config("Empty remote"));
        }
        if self.generator.program.trim().is_empty() {
            return Err(SyncError::config("Empty generator program"));
        }
        self.runtime.validate()?;

        let mut seen = HashSet::new();
        for grammar in &self.grammars {
            grammar.validate()?;
            if !seen.insert(grammar.name.as_str()) {
                return Err(SyncError::config(format!(
                    "Duplicate grammar '{}'",
                    grammar.name
                )));
            }
        }
        Ok(())
    }

    /// The configured grammars, restricted to `only` when non-empty (in
    /// configuration order).
    pub fn select(&self, only: &[String]) -> Result<Vec<Grammar>> {
        if only.is_empty() {
            return Ok(self.grammars.clone());
        }

        for name in only {
            if !self.grammars.iter().any(|g| &g.name == name) {
                return Err(SyncError::config(format!(
                    "Unknown grammar '{}'. Known grammars: {}",
                    name,
                    self.grammar_names().join(", ")
                )));
            }
        }

        Ok(self
            .grammars
            .iter()
            .filter(|g| only.contains(&g.name))
            .cloned()
            .collect())
    }

    pub fn grammar_names(&self) -> Vec<&str> {
        self.grammars.iter().map(|g| g.name.as_str()).collect()
    }
}
