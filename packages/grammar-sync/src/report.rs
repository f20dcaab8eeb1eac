//! Sync report: what one run produced, written as JSON on request.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SyncError};

/// One file copied into a grammar's output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedFile {
    pub name: String,
    pub bytes: u64,
    pub sha256: String,
}

/// Outcome for a single grammar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarReport {
    pub name: String,
    /// HEAD of the scratch clone the files were taken from
    pub revision: Option<String>,
    pub generated: bool,
    pub files: Vec<CopiedFile>,
    /// Files copied from the grammar's `examples/` directory
    pub examples: usize,
}

impl GrammarReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn file(&self, name: &str) -> Option<&CopiedFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// Outcome of runtime vendoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeReport {
    pub revision: Option<String>,
    pub files: usize,
}

/// A step that failed under the lenient policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Grammar name, or `tree-sitter` for the runtime
    pub target: String,
    pub error: String,
}

/// Aggregated result of a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub offline: bool,
    pub runtime: Option<RuntimeReport>,
    pub grammars: Vec<GrammarReport>,
    pub failures: Vec<FailureRecord>,
}

impl SyncReport {
    pub fn new(offline: bool) -> Self {
        Self {
            started_at: Utc::now(),
            offline,
            runtime: None,
            grammars: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn grammar(&self, name: &str) -> Option<&GrammarReport> {
        self.grammars.iter().find(|g| g.name == name)
    }

    pub fn record_failure(&mut self, target: impl Into<String>, error: &SyncError) {
        self.failures.push(FailureRecord {
            target: target.into(),
            error: error.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_files(&self) -> usize {
        self.grammars.iter().map(|g| g.files.len()).sum()
    }

    /// `grammar/file -> sha256` for every included file; equal across runs
    /// when nothing changed upstream.
    pub fn digests(&self) -> BTreeMap<String, String> {
        self.grammars
            .iter()
            .flat_map(|g| {
                g.files
                    .iter()
                    .map(move |f| (format!("{}/{}", g.name, f.name), f.sha256.clone()))
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
