//! Concurrent bulk processing of a docs tree.
//!
//! The pipeline drives the [`Rewriter`] over every page a
//! [`FileSelector`] picks under a docs root. Each file is read,
//! rewritten, and written back independently; rewrites share no mutable
//! state, so files are processed concurrently with a bounded
//! `buffer_unordered` fan-out.
//!
//! Failures are aggregated rather than fatal: one unreadable page (or a
//! strict-mode violation) doesn't abort the run. The caller receives a
//! [`ProcessSummary`] with per-file reports and the collected failures
//! and decides how loudly to fail.
//!
//! Output modes:
//! - **in place** (default): changed files are rewritten where they are
//! - **`out_dir`**: every selected page is mirrored under a separate
//!   output root, unchanged pages included, so the output tree is
//!   complete
//! - **`dry_run`**: nothing is written; reports still say what would
//!   change

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

use crate::constants::default_parallelism;
use crate::pattern::FileSelector;
use crate::rewriter::{RewriteOutcome, Rewriter};
use crate::utils::normalize_path_separator;

/// Options for a bulk processing run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Mirror output under this root instead of rewriting in place.
    pub out_dir: Option<PathBuf>,
    /// Report without writing anything.
    pub dry_run: bool,
    /// Concurrent file rewrites; defaults to
    /// [`crate::constants::default_parallelism`].
    pub max_parallel: Option<usize>,
    /// Show a progress bar on stderr. Suppressed anyway when the
    /// `DOCSTAMP_NO_PROGRESS` environment variable is set.
    pub show_progress: bool,
}

/// What happened to one page.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path relative to the docs root.
    pub path: PathBuf,
    /// Substitution accounting from the rewriter.
    pub outcome: RewriteOutcome,
    /// Whether the output differs from the input content.
    pub changed: bool,
}

/// A page that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Path relative to the docs root.
    pub path: PathBuf,
    /// What went wrong (I/O or strict-mode validation).
    pub error: anyhow::Error,
}

/// Aggregated result of a bulk run.
#[derive(Debug, Default)]
pub struct ProcessSummary {
    /// Successful per-file reports, sorted by path.
    pub reports: Vec<FileReport>,
    /// Pages that failed, sorted by path.
    pub failures: Vec<FileFailure>,
}

impl ProcessSummary {
    /// Number of pages processed successfully.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.reports.len()
    }

    /// Number of pages whose content changed.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.reports.iter().filter(|r| r.changed).count()
    }

    /// Total placeholder occurrences replaced across all pages.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.reports.iter().map(|r| r.outcome.replacements).sum()
    }

    /// Whether any page failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Rewrite every selected page under `root`.
///
/// The root is canonicalized before matching, so version segments are
/// extracted from absolute paths and a docs tree whose root itself is a
/// versioned directory still resolves correctly.
///
/// # Errors
///
/// Fails only on setup problems (missing root, unreadable directory).
/// Per-file failures are collected into the summary instead.
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn process_tree(
    root: &Path,
    selector: &FileSelector,
    rewriter: &Rewriter,
    options: &ProcessOptions,
) -> Result<ProcessSummary> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve docs root: {}", root.display()))?;
    let files = selector.select(&root)?;
    let concurrency = options.max_parallel.unwrap_or_else(default_parallelism);

    debug!("Processing {} file(s) with concurrency {}", files.len(), concurrency);

    let progress = if options.show_progress && !progress_disabled() {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("━╸━"),
        );
        bar.set_prefix("Stamping");
        bar
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<std::result::Result<FileReport, FileFailure>> = stream::iter(files)
        .map(|relative| {
            let root = &root;
            let progress = progress.clone();
            async move {
                let result = process_file(root, &relative, rewriter, options)
                    .await
                    .map_err(|error| FileFailure {
                        path: relative.clone(),
                        error,
                    });
                progress.inc(1);
                result
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    progress.finish_and_clear();

    let mut summary = ProcessSummary::default();
    for result in results {
        match result {
            Ok(report) => summary.reports.push(report),
            Err(failure) => summary.failures.push(failure),
        }
    }

    // buffer_unordered completes out of order; restore determinism.
    summary.reports.sort_by(|a, b| a.path.cmp(&b.path));
    summary.failures.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(summary)
}

async fn process_file(
    root: &Path,
    relative: &Path,
    rewriter: &Rewriter,
    options: &ProcessOptions,
) -> Result<FileReport> {
    let absolute = root.join(relative);
    let content = fs::read_to_string(&absolute)
        .await
        .with_context(|| format!("Failed to read {}", absolute.display()))?;

    let path_str = normalize_path_separator(&absolute);
    let rewritten = rewriter.rewrite(&path_str, &content)?;
    let changed = rewritten.content != content;

    if !options.dry_run {
        match &options.out_dir {
            Some(out_dir) => {
                // Mirror every selected page so the output tree is complete.
                let dest = out_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                fs::write(&dest, &rewritten.content)
                    .await
                    .with_context(|| format!("Failed to write {}", dest.display()))?;
            }
            None if changed => {
                fs::write(&absolute, &rewritten.content)
                    .await
                    .with_context(|| format!("Failed to write {}", absolute.display()))?;
            }
            None => {}
        }
    }

    Ok(FileReport {
        path: relative.to_path_buf(),
        outcome: rewritten.outcome,
        changed,
    })
}

fn progress_disabled() -> bool {
    std::env::var("DOCSTAMP_NO_PROGRESS").is_ok()
}
