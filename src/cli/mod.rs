//! Command-line interface for docstamp.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `init` - write a commented `docstamp.toml` template
//! - `process` - rewrite placeholders across a docs tree
//! - `check` - report unresolved placeholders and ambiguous paths
//!
//! # Usage Patterns
//!
//! ```bash
//! # One-time setup
//! docstamp init
//!
//! # Stamp a docs tree in place
//! docstamp process ./content/docs
//!
//! # Stamp into a separate output tree (sources untouched)
//! docstamp process ./content/docs --out-dir ./build/docs
//!
//! # Gate CI on stray placeholders
//! docstamp check ./content/docs --format json
//! ```
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - debug-level logging
//! - `--quiet` - errors only, no progress output
//! - `--config` - explicit path to `docstamp.toml`
//! - `--no-progress` - plain output for CI and non-ANSI terminals

mod check;
mod init;
mod process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global CLI flags.
///
/// Holding this separately from the parsed arguments lets tests inject a
/// configuration without re-parsing argv or mutating global state up
/// front.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter for output on stderr. `None` disables logging
    /// entirely (quiet mode). An explicit `RUST_LOG` wins over this.
    pub log_level: Option<String>,

    /// Disable progress bars. Propagated through the
    /// `DOCSTAMP_NO_PROGRESS` environment variable so the pipeline can
    /// honor it without threading a flag through every call.
    pub no_progress: bool,

    /// Explicit path to the configuration file, if given.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Apply this configuration to the process environment and logging.
    ///
    /// Called exactly once at the start of execution, before any command
    /// runs. Not thread-safe (mutates the environment); the CLI calls it
    /// from the main task before spawning workers.
    pub fn apply(&self) {
        if self.no_progress {
            // SAFETY: called once from the main task before any worker runs.
            unsafe { std::env::set_var("DOCSTAMP_NO_PROGRESS", "1") };
        }

        if let Some(level) = &self.log_level {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.clone()));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

/// Top-level CLI for docstamp.
#[derive(Parser)]
#[command(
    name = "docstamp",
    about = "Stamp version numbers into versioned documentation trees",
    version,
    author,
    long_about = "docstamp rewrites a placeholder token in documentation pages into the \
                  version encoded by each page's version-N.N directory, falling back to a \
                  configured default for unversioned pages."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (defaults to ./docstamp.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress bars and spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write a commented docstamp.toml template
    Init(init::InitCommand),

    /// Rewrite version placeholders across a docs tree
    Process(process::ProcessCommand),

    /// Report unresolved placeholders and ambiguous versioned paths
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute the parsed command with configuration derived from the
    /// global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            // Quiet implies no animated output.
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration (used by tests).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();

        let quiet = self.quiet;
        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Process(cmd) => cmd.execute(config.config_path.as_deref(), quiet).await,
            Commands::Check(cmd) => cmd.execute(config.config_path.as_deref(), quiet).await,
        }
    }
}
