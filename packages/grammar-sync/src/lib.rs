/*
 * grammar-sync - vendored tree-sitter grammars
 *
 * Fetches upstream grammar repositories into a scratch cache, optionally
 * regenerates their parsers, and copies the generated sources into
 * `parsers/<grammar>/` next to a vendored copy of the tree-sitter runtime.
 *
 * Layout:
 * - scratch/<repo>       persistent clones (git CLI)
 * - parsers/<grammar>/   grammar.json, parser.c, scanner.c(c), node-types.json, tag.h
 * - tree-sitter/         runtime lib/ subtree
 */

pub mod config;
pub mod driver;
pub mod errors;
pub mod fsops;
pub mod generate;
pub mod grammar;
pub mod process;
pub mod report;
pub mod vcs;

// Re-exports
pub use config::{FailurePolicy, Layout, RuntimeConfig, SyncConfig};
pub use driver::{SyncDriver, SyncOptions};
pub use errors::{ErrorKind, Result, SyncError};
pub use generate::Generator;
pub use grammar::{Grammar, INCLUDED_FILES};
pub use process::{CommandRunner, CommandSpec, SystemRunner};
pub use report::{CopiedFile, GrammarReport, SyncReport};
