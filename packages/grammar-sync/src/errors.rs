//! Error types for grammar-sync

use std::fmt;
use thiserror::Error;

/// Sync error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filesystem errors (copy, remove, create)
    Io,
    /// libgit2 errors (opening a clone, reading HEAD)
    Git,
    /// A subprocess could not be spawned or exited non-zero
    Command,
    /// Invalid manifest or CLI selection
    Config,
    /// Report / manifest (de)serialization
    Serialization,
    /// Offline run without a pre-populated clone
    MissingClone,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::Git => "git",
            ErrorKind::Command => "command",
            ErrorKind::Config => "config",
            ErrorKind::Serialization => "serialization",
            ErrorKind::MissingClone => "missing_clone",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sync error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct SyncError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl SyncError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn git(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Git, message)
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Command, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn missing_clone(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorKind::MissingClone,
            format!(
                "No clone at {} (offline mode does not fetch)",
                path.as_ref().display()
            ),
        )
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::io(format!("IO error: {}", err)).with_source(err)
    }
}

impl From<git2::Error> for SyncError {
    fn from(err: git2::Error) -> Self {
        SyncError::git(format!("libgit2 error: {}", err.message())).with_source(err)
    }
}

impl From<walkdir::Error> for SyncError {
    fn from(err: walkdir::Error) -> Self {
        SyncError::io(format!("Walk error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::new(ErrorKind::Serialization, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::new(ErrorKind::Serialization, format!("YAML parsing error: {}", err))
            .with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SyncError>;
