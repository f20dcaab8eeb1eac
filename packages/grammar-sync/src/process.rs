//! Subprocess execution
//!
//! Every external tool (git, the parser generator) goes through a
//! [`CommandRunner`] so the driver can be exercised without a network or a
//! tree-sitter installation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::errors::{Result, SyncError};

/// A fully-specified command line with an optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Rendered as `"<cwd>" > "git" "pull"`, cwd `.` when unset
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cwd {
            Some(cwd) => write!(f, "{:?} >", cwd.display().to_string())?,
            None => write!(f, "\".\" >")?,
        }
        for word in self.argv() {
            write!(f, " {:?}", word)?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    /// Run the command, failing on spawn errors and non-zero exit.
    fn run(&self, command: &CommandSpec) -> Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        (**self).run(command)
    }
}

/// Runs commands as real child processes, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        info!("{}", command);

        let mut child = Command::new(&command.program);
        child.args(&command.args);
        if let Some(cwd) = &command.cwd {
            child.current_dir(cwd);
        }

        let status = child.status().map_err(|e| {
            SyncError::command(format!("Failed to spawn {}: {}", command, e)).with_source(e)
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SyncError::command(format!(
                "{} exited with {}",
                command, status
            )))
        }
    }
}
