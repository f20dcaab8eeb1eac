//! Manifest I/O (YAML)
//!
//! Defines the on-disk schema. Conversion into [`SyncConfig`] lives in
//! `mod.rs`.
//!
//! [`SyncConfig`]: super::SyncConfig

use serde::{Deserialize, Serialize};

use super::{FailurePolicy, RuntimeConfig};
use crate::generate::Generator;
use crate::grammar::Grammar;

/// Supported manifest versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestV1 {
    /// Schema version (always 1 for v1); optional only so a missing value
    /// gets a useful error
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<FailurePolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Generator>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeConfig>,

    pub grammars: Vec<GrammarEntry>,
}

/// A grammar is either a bare name or a full descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrammarEntry {
    Name(String),
    Full(Grammar),
}

impl From<GrammarEntry> for Grammar {
    fn from(entry: GrammarEntry) -> Self {
        match entry {
            GrammarEntry::Name(name) => Grammar::new(name),
            GrammarEntry::Full(grammar) => grammar,
        }
    }
}
