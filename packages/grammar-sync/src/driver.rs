//! Grammar Sync Driver
//!
//! Sequential batch: vendor the runtime, replace the output tree, then for
//! each grammar refresh its scratch clone, optionally regenerate, and copy the
//! allow-listed files. Each grammar is finished before the next starts.
//!
//! Under [`FailurePolicy::Strict`] the first failing step aborts the run.
//! Under [`FailurePolicy::Lenient`] failing steps are logged, recorded in the
//! report, and the remaining steps still run (a failed pull still copies
//! whatever the clone holds).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, Layout, RuntimeConfig, SyncConfig};
use crate::errors::{Result, SyncError};
use crate::fsops::{copy_tree, include_file, reset_dir};
use crate::generate::Generator;
use crate::grammar::{Grammar, INCLUDED_FILES};
use crate::process::{CommandRunner, SystemRunner};
use crate::report::{CopiedFile, GrammarReport, RuntimeReport, SyncReport};
use crate::vcs::{ensure_repository, head_revision, CloneAction, GitClient};

/// Report target used for runtime failures
pub const RUNTIME_TARGET: &str = "tree-sitter";

/// Per-run flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Skip clone/pull; scratch clones must already exist
    pub offline: bool,
    pub policy: FailurePolicy,
    /// Run the generator for every grammar, not just those flagged
    pub generate_all: bool,
    /// Vendor the runtime (also requires it to be enabled in the config)
    pub runtime: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            offline: false,
            policy: FailurePolicy::Strict,
            generate_all: false,
            runtime: true,
        }
    }
}

impl SyncOptions {
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn generate_all(mut self, generate_all: bool) -> Self {
        self.generate_all = generate_all;
        self
    }

    pub fn runtime(mut self, runtime: bool) -> Self {
        self.runtime = runtime;
        self
    }
}

/// Drives one sync run over a grammar list
pub struct SyncDriver<R = SystemRunner> {
    layout: Layout,
    remote: String,
    generator: Generator,
    runtime: RuntimeConfig,
    runner: R,
}

impl SyncDriver<SystemRunner> {
    pub fn new(config: &SyncConfig, layout: Layout) -> Self {
        Self::with_runner(config, layout, SystemRunner)
    }
}

impl<R: CommandRunner> SyncDriver<R> {
    pub fn with_runner(config: &SyncConfig, layout: Layout, runner: R) -> Self {
        Self {
            layout,
            remote: config.remote.clone(),
            generator: config.generator.clone(),
            runtime: config.runtime.clone(),
            runner,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Sync every grammar in `grammars`, in order.
    pub fn sync(&self, grammars: &[Grammar], options: &SyncOptions) -> Result<SyncReport> {
        let start = Instant::now();
        info!(
            "Syncing {} grammars (offline: {}, policy: {})",
            grammars.len(),
            options.offline,
            options.policy
        );

        fs::create_dir_all(&self.layout.scratch).map_err(|e| {
            SyncError::io(format!(
                "Failed to create scratch directory {}: {}",
                self.layout.scratch.display(),
                e
            ))
            .with_source(e)
        })?;

        let mut report = SyncReport::new(options.offline);
        let mut refreshed = HashSet::new();

        if options.runtime && self.runtime.enabled {
            let runtime = self.refresh_runtime(options, &mut refreshed);
            let runtime = step(options.policy, &mut report, RUNTIME_TARGET, runtime)?;
            report.runtime = runtime;
        } else {
            debug!("Runtime vendoring disabled");
        }

        reset_dir(&self.layout.parsers)?;

        for (i, grammar) in grammars.iter().enumerate() {
            info!("[{}/{}] {}", i + 1, grammars.len(), grammar.name);
            let outcome = self.sync_grammar(grammar, options, &mut refreshed, &mut report)?;
            report.grammars.push(outcome);
        }

        info!(
            "Synced {} grammars, {} files, {} failures in {:?}",
            report.grammars.len(),
            report.total_files(),
            report.failures.len(),
            start.elapsed()
        );
        Ok(report)
    }

    /// Copy `<source_dir>/<file>` into the grammar's output directory if
    /// present. Absence is not an error.
    pub fn include(&self, grammar: &Grammar, file: &str) -> Result<Option<CopiedFile>> {
        let src = grammar.source_dir(&self.layout.scratch);
        if !src.join(file).is_file() {
            debug!("{}: no {}", grammar.name, file);
            return Ok(None);
        }

        let dst = grammar.output_dir(&self.layout.parsers);
        fs::create_dir_all(&dst)?;
        include_file(&src, &dst, file)
    }

    /// Refresh the runtime clone and replace the runtime directory with its
    /// vendored subtree.
    pub fn vendor_runtime(&self, options: &SyncOptions) -> Result<RuntimeReport> {
        self.refresh_runtime(options, &mut HashSet::new())
    }

    fn refresh_runtime(
        &self,
        options: &SyncOptions,
        refreshed: &mut HashSet<PathBuf>,
    ) -> Result<RuntimeReport> {
        let clone = self.layout.scratch.join(&self.runtime.repo);
        self.ensure_clone(
            &self.runtime.clone_url(&self.remote),
            &clone,
            self.runtime.submodules,
            options.offline,
            refreshed,
        )?;

        let subtree = clone.join(&self.runtime.path);
        if !subtree.is_dir() {
            return Err(SyncError::io(format!(
                "Runtime subtree {} does not exist",
                subtree.display()
            )));
        }

        reset_dir(&self.layout.runtime)?;
        let files = copy_tree(&subtree, &self.layout.runtime)?;
        info!(
            "Vendored runtime: {} files into {}",
            files,
            self.layout.runtime.display()
        );

        Ok(RuntimeReport {
            revision: head_revision(&clone),
            files,
        })
    }

    fn sync_grammar(
        &self,
        grammar: &Grammar,
        options: &SyncOptions,
        refreshed: &mut HashSet<PathBuf>,
        report: &mut SyncReport,
    ) -> Result<GrammarReport> {
        let policy = options.policy;
        let name = grammar.name.as_str();
        let scratch = &self.layout.scratch;
        let clone = grammar.clone_dir(scratch);
        let mut outcome = GrammarReport::new(name);

        let refresh = self.ensure_clone(
            &grammar.clone_url(&self.remote),
            &clone,
            grammar.submodules,
            options.offline,
            refreshed,
        );
        step(policy, report, name, refresh)?;

        if grammar.generate || options.generate_all {
            let generated = self.generator.run(&self.runner, &grammar.grammar_dir(scratch));
            outcome.generated = step(policy, report, name, generated)?.is_some();
        }

        let out = grammar.output_dir(&self.layout.parsers);
        fs::create_dir_all(&out)?;

        // Grammar directory first, then the clone root shared by every
        // grammar of a multi-grammar repository
        let examples = [grammar.grammar_dir(scratch), clone.clone()]
            .into_iter()
            .map(|dir| dir.join("examples"))
            .find(|dir| dir.is_dir());
        if let Some(examples) = examples {
            let copied = copy_tree(&examples, &out.join("examples"));
            outcome.examples = step(policy, report, name, copied)?.unwrap_or(0);
        }

        for file in INCLUDED_FILES {
            let included = self.include(grammar, file);
            if let Some(Some(copied)) = step(policy, report, name, included)? {
                outcome.files.push(copied);
            }
        }

        outcome.revision = head_revision(&clone);
        debug!(
            "{}: {} files, revision {:?}",
            name,
            outcome.files.len(),
            outcome.revision
        );
        Ok(outcome)
    }

    /// Clone or update `clone` unless offline; each clone is refreshed at most
    /// once per run even when several grammars share it.
    fn ensure_clone(
        &self,
        url: &str,
        clone: &Path,
        submodules: bool,
        offline: bool,
        refreshed: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        if offline {
            return ensure_repository(clone);
        }
        if refreshed.contains(clone) {
            debug!("{} already refreshed this run", clone.display());
            return Ok(());
        }

        match GitClient::new(&self.runner).clone_or_update(url, clone, submodules)? {
            CloneAction::Cloned => info!("Cloned {}", url),
            CloneAction::Updated => debug!("Updated {}", clone.display()),
        }
        refreshed.insert(clone.to_path_buf());
        Ok(())
    }
}

/// Apply the failure policy to one step: strict propagates, lenient records
/// and yields `None`.
fn step<T>(
    policy: FailurePolicy,
    report: &mut SyncReport,
    target: &str,
    result: Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match policy {
            FailurePolicy::Strict => Err(err),
            FailurePolicy::Lenient => {
                warn!("{}: {} (continuing)", target, err);
                report.record_failure(target, &err);
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::process::CommandSpec;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Fake upstream: `git clone` materialises the registered file set,
    /// generator runs write `src/parser.c`, and commands whose argv contains a
    /// registered marker fail.
    #[derive(Default)]
    struct FakeUpstream {
        repos: HashMap<String, Vec<(&'static str, &'static str)>>,
        failing: Vec<&'static str>,
        log: RefCell<Vec<CommandSpec>>,
    }

    impl FakeUpstream {
        fn repo(mut self, url: &str, files: Vec<(&'static str, &'static str)>) -> Self {
            self.repos.insert(url.to_string(), files);
            self
        }

        fn failing(mut self, marker: &'static str) -> Self {
            self.failing.push(marker);
            self
        }

        fn argvs(&self) -> Vec<Vec<String>> {
            self.log
                .borrow()
                .iter()
                .map(|c| c.argv().into_iter().map(String::from).collect())
                .collect()
        }
    }

    impl CommandRunner for FakeUpstream {
        fn run(&self, command: &CommandSpec) -> Result<()> {
            self.log.borrow_mut().push(command.clone());

            if command
                .argv()
                .iter()
                .any(|w| self.failing.iter().any(|marker| marker == w))
            {
                return Err(SyncError::command(format!("{} exited with 1", command)));
            }

            match command.argv().as_slice() {
                ["git", "clone", url, target] => {
                    let files = self
                        .repos
                        .get(*url)
                        .ok_or_else(|| SyncError::command(format!("no such repo {}", url)))?;
                    for (path, content) in files {
                        let path = Path::new(target).join(path);
                        fs::create_dir_all(path.parent().unwrap())?;
                        fs::write(path, content)?;
                    }
                    fs::create_dir_all(target)?;
                }
                ["tree-sitter", "generate"] => {
                    let cwd = command.cwd.as_ref().unwrap();
                    fs::create_dir_all(cwd.join("src"))?;
                    fs::write(cwd.join("src/parser.c"), "/* generated */")?;
                }
                _ => {}
            }
            Ok(())
        }
    }

    const REMOTE: &str = "https://example.com/";

    fn config() -> SyncConfig {
        SyncConfig {
            remote: REMOTE.to_string(),
            ..SyncConfig::default()
        }
    }

    fn upstream() -> FakeUpstream {
        FakeUpstream::default()
            .repo(
                "https://example.com/tree-sitter",
                vec![
                    ("lib/include/tree_sitter/api.h", "api"),
                    ("lib/src/lib.c", "lib"),
                    ("cli/main.rs", "not vendored"),
                ],
            )
            .repo(
                "https://example.com/tree-sitter-rust",
                vec![
                    ("src/grammar.json", "{}"),
                    ("src/parser.c", "rust parser"),
                    ("src/scanner.c", "rust scanner"),
                    ("src/node-types.json", "[]"),
                    ("examples/ast.rs", "fn main() {}"),
                ],
            )
            .repo(
                "https://example.com/tree-sitter-go",
                vec![("src/grammar.json", "{}"), ("src/parser.c", "go parser")],
            )
    }

    fn no_runtime() -> SyncOptions {
        SyncOptions::default().runtime(false)
    }

    #[test]
    fn test_sync_clones_then_copies() {
        let root = tempfile::tempdir().unwrap();
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());
        let grammars = vec![Grammar::new("rust"), Grammar::new("go")];

        let report = driver.sync(&grammars, &no_runtime()).unwrap();

        let parsers = root.path().join("parsers");
        assert_eq!(
            fs::read_to_string(parsers.join("rust/parser.c")).unwrap(),
            "rust parser"
        );
        assert!(parsers.join("rust/scanner.c").is_file());
        assert!(parsers.join("rust/node-types.json").is_file());
        assert_eq!(
            fs::read_to_string(parsers.join("rust/examples/ast.rs")).unwrap(),
            "fn main() {}"
        );
        assert!(parsers.join("go/parser.c").is_file());

        // Optional files missing upstream do not abort the run
        assert!(!parsers.join("go/scanner.c").exists());
        assert!(!parsers.join("rust/scanner.cc").exists());
        assert!(!parsers.join("rust/tag.h").exists());

        let rust = report.grammar("rust").unwrap();
        let names: Vec<_> = rust.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["grammar.json", "parser.c", "scanner.c", "node-types.json"]
        );
        assert_eq!(rust.examples, 1);
        assert!(!rust.generated);
        assert!(report.is_clean());
        assert!(report.runtime.is_none());
    }

    #[test]
    fn test_existing_clone_is_reset_and_pulled() {
        let root = tempfile::tempdir().unwrap();
        let layout = Layout::rooted(root.path());
        fs::create_dir_all(layout.scratch.join("tree-sitter-go/src")).unwrap();
        fs::write(layout.scratch.join("tree-sitter-go/src/parser.c"), "cached").unwrap();

        let driver = SyncDriver::with_runner(&config(), layout, upstream());
        driver
            .sync(&[Grammar::new("go")], &no_runtime())
            .unwrap();

        assert_eq!(
            driver.runner().argvs(),
            vec![
                vec!["git", "reset", "--hard", "HEAD"],
                vec!["git", "pull"],
            ]
        );
        assert_eq!(
            fs::read_to_string(root.path().join("parsers/go/parser.c")).unwrap(),
            "cached"
        );
    }

    #[test]
    fn test_output_tree_replaced_wholesale() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("parsers/cobol/parser.c");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());
        driver.sync(&[Grammar::new("go")], &no_runtime()).unwrap();

        assert!(!root.path().join("parsers/cobol").exists());
        assert!(root.path().join("parsers/go/parser.c").is_file());
    }

    #[test]
    fn test_sync_twice_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());
        let grammars = vec![Grammar::new("rust"), Grammar::new("go")];

        let first = driver.sync(&grammars, &no_runtime()).unwrap();
        let second = driver.sync(&grammars, &no_runtime()).unwrap();

        assert_eq!(first.digests(), second.digests());
        assert_eq!(first.digests().len(), 6);
    }

    #[test]
    fn test_runtime_vendoring() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("tree-sitter/old.c");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());
        let report = driver.sync(&[], &SyncOptions::default()).unwrap();

        let runtime = root.path().join("tree-sitter");
        assert!(runtime.join("include/tree_sitter/api.h").is_file());
        assert!(runtime.join("src/lib.c").is_file());
        assert!(!runtime.join("cli").exists());
        assert!(!stale.exists());
        assert_eq!(report.runtime.unwrap().files, 2);
    }

    #[test]
    fn test_vendor_runtime_missing_subtree() {
        let root = tempfile::tempdir().unwrap();
        let runner = FakeUpstream::default()
            .repo("https://example.com/tree-sitter", vec![("README.md", "no lib")]);
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);

        let err = driver.vendor_runtime(&SyncOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.message.contains("lib"));
    }

    #[test]
    fn test_generate_runs_in_grammar_dir_before_copy() {
        let root = tempfile::tempdir().unwrap();
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());
        let grammars = vec![Grammar::new("go").with_generate(true)];

        let report = driver.sync(&grammars, &no_runtime()).unwrap();

        let log = driver.runner().log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].argv()[..2].to_vec(), vec!["git", "clone"]);
        assert_eq!(log[1].argv(), vec!["tree-sitter", "generate"]);
        assert_eq!(
            log[1].cwd.as_deref(),
            Some(root.path().join("scratch/tree-sitter-go").as_path())
        );
        assert_eq!(
            fs::read_to_string(root.path().join("parsers/go/parser.c")).unwrap(),
            "/* generated */"
        );
        assert!(report.grammar("go").unwrap().generated);
    }

    #[test]
    fn test_generate_all_flag() {
        let root = tempfile::tempdir().unwrap();
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());

        let report = driver
            .sync(
                &[Grammar::new("rust"), Grammar::new("go")],
                &no_runtime().generate_all(true),
            )
            .unwrap();

        assert!(report.grammars.iter().all(|g| g.generated));
    }

    #[test]
    fn test_shared_clone_refreshed_once() {
        let root = tempfile::tempdir().unwrap();
        let runner = FakeUpstream::default().repo(
            "https://example.com/tree-sitter-typescript",
            vec![
                ("typescript/src/parser.c", "ts"),
                ("tsx/src/parser.c", "tsx"),
            ],
        );
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);
        let grammars = vec![
            Grammar::new("typescript")
                .with_repo("tree-sitter-typescript")
                .with_path("typescript"),
            Grammar::new("tsx")
                .with_repo("tree-sitter-typescript")
                .with_path("tsx"),
        ];

        driver.sync(&grammars, &no_runtime()).unwrap();

        assert_eq!(driver.runner().argvs().len(), 1);
        let parsers = root.path().join("parsers");
        assert_eq!(fs::read_to_string(parsers.join("typescript/parser.c")).unwrap(), "ts");
        assert_eq!(fs::read_to_string(parsers.join("tsx/parser.c")).unwrap(), "tsx");
    }

    #[test]
    fn test_examples_fall_back_to_clone_root() {
        let root = tempfile::tempdir().unwrap();
        let runner = FakeUpstream::default()
            .repo(
                "https://example.com/tree-sitter-typescript",
                vec![
                    ("examples/a.ts", "let a = 1;"),
                    ("typescript/src/parser.c", "ts"),
                ],
            )
            .repo(
                "https://example.com/tree-sitter-php",
                vec![
                    ("examples/root.php", "<?php"),
                    ("php/examples/nested.php", "<?php echo 1;"),
                    ("php/src/parser.c", "php"),
                ],
            );
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);
        let grammars = vec![
            Grammar::new("typescript")
                .with_repo("tree-sitter-typescript")
                .with_path("typescript"),
            Grammar::new("php").with_path("php"),
        ];

        let report = driver.sync(&grammars, &no_runtime()).unwrap();

        let parsers = root.path().join("parsers");
        assert_eq!(
            fs::read_to_string(parsers.join("typescript/examples/a.ts")).unwrap(),
            "let a = 1;"
        );
        assert_eq!(report.grammar("typescript").unwrap().examples, 1);

        // The grammar directory's own examples win over the clone root's
        assert!(parsers.join("php/examples/nested.php").is_file());
        assert!(!parsers.join("php/examples/root.php").exists());
        assert_eq!(report.grammar("php").unwrap().examples, 1);
    }

    #[test]
    fn test_submodules_initialised_when_requested() {
        let root = tempfile::tempdir().unwrap();
        let mut config = config();
        config.runtime.submodules = true;
        let driver = SyncDriver::with_runner(&config, Layout::rooted(root.path()), upstream());
        let grammars = vec![Grammar::new("rust").with_submodules(true), Grammar::new("go")];

        driver.sync(&grammars, &SyncOptions::default()).unwrap();

        let scratch = root.path().join("scratch");
        let submodule_dirs: Vec<_> = driver
            .runner()
            .log
            .borrow()
            .iter()
            .filter(|c| c.args.first().map(String::as_str) == Some("submodule"))
            .map(|c| c.cwd.clone())
            .collect();
        assert_eq!(
            submodule_dirs,
            vec![
                Some(scratch.join("tree-sitter")),
                Some(scratch.join("tree-sitter-rust")),
            ]
        );
        assert_eq!(
            driver.runner().argvs()[1],
            vec!["git", "submodule", "update", "--init"]
        );
    }

    #[test]
    fn test_strict_policy_aborts_on_first_failure() {
        let root = tempfile::tempdir().unwrap();
        let runner = upstream().failing("https://example.com/tree-sitter-rust");
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);

        let err = driver
            .sync(&[Grammar::new("rust"), Grammar::new("go")], &no_runtime())
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Command);
        // go was never attempted
        assert_eq!(driver.runner().argvs().len(), 1);
        assert!(!root.path().join("parsers/go").exists());
    }

    #[test]
    fn test_lenient_policy_records_and_continues() {
        let root = tempfile::tempdir().unwrap();
        let runner = upstream().failing("https://example.com/tree-sitter-rust");
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);

        let report = driver
            .sync(
                &[Grammar::new("rust"), Grammar::new("go")],
                &no_runtime().policy(FailurePolicy::Lenient),
            )
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, "rust");
        assert!(report.grammar("rust").unwrap().files.is_empty());
        assert!(root.path().join("parsers/rust").is_dir());
        assert!(root.path().join("parsers/go/parser.c").is_file());
    }

    #[test]
    fn test_lenient_failed_generate_still_copies() {
        let root = tempfile::tempdir().unwrap();
        let runner = upstream().failing("generate");
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), runner);

        let report = driver
            .sync(
                &[Grammar::new("go").with_generate(true)],
                &no_runtime().policy(FailurePolicy::Lenient),
            )
            .unwrap();

        let go = report.grammar("go").unwrap();
        assert!(!go.generated);
        assert_eq!(go.file("parser.c").map(|f| f.bytes), Some(9));
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_offline_issues_no_commands() {
        let root = tempfile::tempdir().unwrap();
        let layout = Layout::rooted(root.path());
        let clone = layout.scratch.join("tree-sitter-go");
        fs::create_dir_all(clone.join("src")).unwrap();
        fs::write(clone.join("src/parser.c"), "offline").unwrap();
        git2::Repository::init(&clone).unwrap();

        let driver = SyncDriver::with_runner(&config(), layout, upstream());
        let report = driver
            .sync(&[Grammar::new("go")], &no_runtime().offline(true))
            .unwrap();

        assert!(driver.runner().argvs().is_empty());
        assert!(report.offline);
        assert_eq!(
            fs::read_to_string(root.path().join("parsers/go/parser.c")).unwrap(),
            "offline"
        );
    }

    #[test]
    fn test_offline_missing_clone() {
        let root = tempfile::tempdir().unwrap();
        let driver = SyncDriver::with_runner(&config(), Layout::rooted(root.path()), upstream());

        let err = driver
            .sync(&[Grammar::new("go")], &no_runtime().offline(true))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingClone);

        let report = driver
            .sync(
                &[Grammar::new("go")],
                &no_runtime().offline(true).policy(FailurePolicy::Lenient),
            )
            .unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(report.grammar("go").unwrap().files.is_empty());
    }

    #[test]
    fn test_include_absent_and_present() {
        let root = tempfile::tempdir().unwrap();
        let layout = Layout::rooted(root.path());
        let src = layout.scratch.join("tree-sitter-html/src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("tag.h"), "tags").unwrap();

        let driver = SyncDriver::with_runner(&config(), layout, upstream());
        let html = Grammar::new("html");

        assert!(driver.include(&html, "scanner.c").unwrap().is_none());
        assert!(!root.path().join("parsers/html").exists());

        let copied = driver.include(&html, "tag.h").unwrap().unwrap();
        assert_eq!(copied.bytes, 4);
        assert!(root.path().join("parsers/html/tag.h").is_file());
    }
}
