//! Report unresolved placeholders and ambiguous versioned paths.
//!
//! `check` is the strict analysis pass: regardless of the configured
//! `on-unresolved` policy it reports every page whose content contains
//! the placeholder without a versioned directory to resolve it, and
//! every page whose path encodes more than one version segment. Nothing
//! is written. The command exits nonzero when it finds anything, which
//! makes it suitable as a CI gate in front of the site build.
//!
//! # Examples
//!
//! ```bash
//! docstamp check ./content/docs
//! docstamp check ./content/docs --format json
//! ```

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::pattern::FileSelector;
use crate::utils::normalize_path_separator;
use crate::version::{DottedVersion, extract_versions};

/// Output format for check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text
    #[default]
    Text,
    /// Machine-readable JSON on stdout
    Json,
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum FindingKind {
    /// Placeholder present but no versioned directory in the path.
    UnresolvedPlaceholder,
    /// Path encodes more than one version segment.
    MultipleVersionSegments,
}

/// One problem found in the docs tree.
#[derive(Debug, Clone, Serialize)]
struct Finding {
    /// Path relative to the docs root.
    path: String,
    kind: FindingKind,
    detail: String,
}

/// The full check report, also the JSON output shape.
#[derive(Debug, Serialize)]
struct CheckReport {
    files_checked: usize,
    findings: Vec<Finding>,
}

/// Command to analyze a docs tree without modifying it.
#[derive(Args)]
pub struct CheckCommand {
    /// Docs root to analyze
    root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl CheckCommand {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error (and exits nonzero) when any finding is
    /// reported, so the command can gate CI pipelines.
    pub async fn execute(self, config_path: Option<&Path>, quiet: bool) -> Result<()> {
        let config = Config::load_or_default(config_path)?;
        let selector = FileSelector::new(&config.files.include, &config.files.exclude)?;

        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("Failed to resolve docs root: {}", self.root.display()))?;
        let files = selector.select(&root)?;

        let placeholder = &config.rewrite.placeholder;
        let mut findings = Vec::new();

        for relative in &files {
            let absolute = root.join(relative);
            let content = tokio::fs::read_to_string(&absolute)
                .await
                .with_context(|| format!("Failed to read {}", absolute.display()))?;

            let path_str = normalize_path_separator(&absolute);
            let versions = extract_versions(&path_str);
            let occurrences = content.matches(placeholder.as_str()).count();

            if versions.is_empty() && occurrences > 0 {
                findings.push(Finding {
                    path: normalize_path_separator(relative),
                    kind: FindingKind::UnresolvedPlaceholder,
                    detail: format!(
                        "{occurrences} occurrence(s) of \"{placeholder}\" outside a versioned directory"
                    ),
                });
            }

            if versions.len() > 1 {
                findings.push(Finding {
                    path: normalize_path_separator(relative),
                    kind: FindingKind::MultipleVersionSegments,
                    detail: format!(
                        "path encodes {} version segments: {}",
                        versions.len(),
                        versions.iter().map(DottedVersion::as_str).collect::<Vec<_>>().join(", ")
                    ),
                });
            }
        }

        let report = CheckReport {
            files_checked: files.len(),
            findings,
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text if !quiet => print_report(&report),
            OutputFormat::Text => {}
        }

        if report.findings.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("check found {} issue(s)", report.findings.len()))
        }
    }
}

fn print_report(report: &CheckReport) {
    if report.findings.is_empty() {
        println!(
            "{} {} file(s) checked, no unresolved placeholders",
            "✓".green(),
            report.files_checked
        );
        return;
    }

    for finding in &report.findings {
        let kind = match finding.kind {
            FindingKind::UnresolvedPlaceholder => "unresolved placeholder",
            FindingKind::MultipleVersionSegments => "multiple version segments",
        };
        println!("{} {}: {} ({})", "✗".red(), finding.path.bold(), kind.yellow(), finding.detail);
    }
    println!(
        "\n{} file(s) checked, {} issue(s) found",
        report.files_checked,
        report.findings.len()
    );
}
