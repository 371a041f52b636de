//! Rewrite version placeholders across a docs tree.
//!
//! Reads the project configuration, applies any CLI overrides, selects
//! pages under the given root, and runs the concurrent pipeline. By
//! default changed pages are rewritten in place; `--out-dir` mirrors
//! every selected page into a separate tree instead, and `--dry-run`
//! only reports.
//!
//! # Examples
//!
//! ```bash
//! # Stamp in place with the configured defaults
//! docstamp process ./content/docs
//!
//! # Produce a stamped copy for the site generator, sources untouched
//! docstamp process ./content/docs --out-dir ./build/docs
//!
//! # Fail on placeholders outside versioned directories
//! docstamp process ./content/docs --strict --dry-run
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::pattern::FileSelector;
use crate::pipeline::{ProcessOptions, ProcessSummary, process_tree};
use crate::rewriter::{Rewriter, UnresolvedPolicy};

/// Command to rewrite version placeholders across a docs tree.
#[derive(Args)]
pub struct ProcessCommand {
    /// Docs root to process
    root: PathBuf,

    /// Write stamped pages under this directory instead of in place
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Fail on placeholders outside versioned directories
    /// (overrides on-unresolved from the configuration)
    #[arg(long)]
    strict: bool,

    /// Override the configured default version
    #[arg(long, value_name = "VERSION")]
    default_version: Option<String>,

    /// Override the configured placeholder token
    #[arg(long, value_name = "TOKEN")]
    placeholder: Option<String>,

    /// Maximum concurrent file rewrites
    #[arg(long, value_name = "N")]
    max_parallel: Option<usize>,
}

impl ProcessCommand {
    /// Execute the process command.
    pub async fn execute(self, config_path: Option<&Path>, quiet: bool) -> Result<()> {
        let config = Config::load_or_default(config_path)?;

        let mut options = config.rewrite_options();
        if let Some(version) = self.default_version {
            options.default_version = version;
        }
        if let Some(placeholder) = self.placeholder {
            options.placeholder = placeholder;
        }
        if self.strict {
            options.on_unresolved = UnresolvedPolicy::Error;
        }

        let rewriter = Rewriter::new(options)?;
        let selector = FileSelector::new(&config.files.include, &config.files.exclude)?;

        let pipeline_options = ProcessOptions {
            out_dir: self.out_dir.clone(),
            dry_run: self.dry_run,
            max_parallel: self.max_parallel.or(config.build.max_parallel),
            show_progress: !quiet,
        };

        let summary = process_tree(&self.root, &selector, &rewriter, &pipeline_options).await?;

        if !quiet {
            print_summary(&summary, self.dry_run);
        }

        if summary.has_failures() {
            for failure in &summary.failures {
                eprintln!("{} {}: {:#}", "✗".red(), failure.path.display(), failure.error);
            }
            return Err(anyhow!("{} file(s) failed to process", summary.failures.len()));
        }

        Ok(())
    }
}

fn print_summary(summary: &ProcessSummary, dry_run: bool) {
    if dry_run {
        if summary.changed() == 0 {
            println!("{} Nothing to change in {} file(s)", "✓".green(), summary.processed());
        } else {
            println!(
                "{} Would update {} of {} file(s) ({} replacement(s)):",
                "✓".green(),
                summary.changed(),
                summary.processed(),
                summary.replacements()
            );
            for report in summary.reports.iter().filter(|r| r.changed) {
                println!(
                    "  {} -> {}",
                    report.path.display(),
                    report.outcome.version.bright_white()
                );
            }
        }
        return;
    }

    println!(
        "{} Stamped {} file(s): {} updated, {} replacement(s)",
        "✓".green(),
        summary.processed(),
        summary.changed(),
        summary.replacements()
    );
}
