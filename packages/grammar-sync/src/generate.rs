//! Parser generator invocation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::process::{CommandRunner, CommandSpec};

/// External grammar compiler, run inside the grammar directory so it picks up
/// `grammar.js` and writes `src/` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Generator {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            program: "tree-sitter".to_string(),
            args: vec!["generate".to_string()],
        }
    }
}

impl Generator {
    pub fn command(&self, grammar_dir: &Path) -> CommandSpec {
        CommandSpec::new(self.program.clone(), self.args.iter().cloned()).in_dir(grammar_dir)
    }

    pub fn run<R: CommandRunner>(&self, runner: &R, grammar_dir: &Path) -> Result<()> {
        runner.run(&self.command(grammar_dir))
    }
}
