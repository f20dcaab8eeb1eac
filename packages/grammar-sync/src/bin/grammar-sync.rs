//! grammar-sync CLI
//!
//! # Usage
//!
//! ```bash
//! # Refresh every built-in grammar and the runtime
//! cargo run --bin grammar-sync
//!
//! # Rebuild outputs from existing clones, no network
//! cargo run --bin grammar-sync -- --offline
//!
//! # A subset, regenerated, ignoring failures, with a report
//! cargo run --bin grammar-sync -- --only rust --only go --generate --keep-going --report sync.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grammar_sync::{FailurePolicy, Layout, SyncConfig, SyncDriver, SyncOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grammar-sync")]
#[command(about = "Fetch tree-sitter grammars and vendor their generated parsers", long_about = None)]
struct Cli {
    /// Skip clone/pull and rebuild outputs from existing scratch clones
    #[arg(long)]
    offline: bool,

    /// YAML grammar manifest (default: built-in grammar list)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for scratch/, parsers/ and tree-sitter/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Clone cache directory
    #[arg(long)]
    scratch: Option<PathBuf>,

    /// Output directory (replaced on every run)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Vendored runtime directory (replaced on every run)
    #[arg(long)]
    runtime_dir: Option<PathBuf>,

    /// Log failures and continue instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Failure policy, overriding the manifest (strict or lenient)
    #[arg(long, value_name = "POLICY", conflicts_with = "keep_going")]
    policy: Option<FailurePolicy>,

    /// Run the parser generator for every grammar
    #[arg(long)]
    generate: bool,

    /// Do not vendor the tree-sitter runtime
    #[arg(long)]
    no_runtime: bool,

    /// Only sync these grammars (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Write a JSON sync report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn layout(&self) -> Layout {
        let mut layout = Layout::rooted(&self.root);
        if let Some(scratch) = &self.scratch {
            layout.scratch = scratch.clone();
        }
        if let Some(output) = &self.output {
            layout.parsers = output.clone();
        }
        if let Some(runtime) = &self.runtime_dir {
            layout.runtime = runtime.clone();
        }
        layout
    }

    fn options(&self, config: &SyncConfig) -> SyncOptions {
        let policy = if self.keep_going {
            FailurePolicy::Lenient
        } else {
            self.policy.unwrap_or(config.policy)
        };

        SyncOptions::default()
            .offline(self.offline)
            .policy(policy)
            .generate_all(self.generate)
            .runtime(!self.no_runtime)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => SyncConfig::from_yaml(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        None => SyncConfig::default(),
    };
    let grammars = config.select(&cli.only)?;
    let options = cli.options(&config);

    let driver = SyncDriver::new(&config, cli.layout());
    let report = driver.sync(&grammars, &options).context("grammar sync failed")?;

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    for failure in &report.failures {
        warn!("{}: {}", failure.target, failure.error);
    }

    Ok(())
}
