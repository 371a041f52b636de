//! Include/exclude file selection for bulk docs processing.
//!
//! The `process` and `check` commands walk a docs root and pick the
//! pages to rewrite using glob patterns from the `[files]` configuration
//! table. Standard glob syntax applies:
//!
//! - `*` matches within a single path component
//! - `**` matches across components (recursive)
//! - `?` matches a single character
//! - `[abc]` / `[a-z]` match character sets and ranges
//!
//! Patterns are matched against paths *relative to the docs root*, with
//! forward-slash separators on every platform. Selection is
//! deterministic: results come back sorted. Symlinks are not followed,
//! and patterns that could escape the root (`..`, absolute paths) are
//! rejected up front.

use anyhow::Result;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::DocstampError;
use crate::utils::normalize_path_separator;

/// Compiled include/exclude pattern sets for selecting pages under a
/// docs root.
///
/// Patterns are compiled once at construction; selection and matching
/// reuse the compiled forms. The selector is cheap to clone and safe to
/// share across threads.
///
/// # Examples
///
/// ```rust,no_run
/// use docstamp::pattern::FileSelector;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let selector = FileSelector::new(
///     &["**/*.md".to_string()],
///     &["**/draft-*.md".to_string()],
/// )?;
///
/// let pages = selector.select(Path::new("docs"))?;
/// println!("{} pages selected", pages.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSelector {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileSelector {
    /// Compile include and exclude pattern lists.
    ///
    /// # Errors
    ///
    /// Returns [`DocstampError::InvalidPattern`] for invalid glob syntax
    /// or for patterns that could escape the docs root (path traversal,
    /// absolute paths).
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// Whether a root-relative path is selected.
    ///
    /// A path is selected when it matches at least one include pattern
    /// and no exclude pattern. No filesystem access is performed.
    #[must_use]
    pub fn matches(&self, relative: &Path) -> bool {
        let path_str = normalize_path_separator(relative);
        self.include.iter().any(|p| p.matches(&path_str))
            && !self.exclude.iter().any(|p| p.matches(&path_str))
    }

    /// Find all selected files under `root`.
    ///
    /// Walks the tree without following symlinks and returns paths
    /// relative to `root`, sorted for deterministic processing order.
    ///
    /// # Errors
    ///
    /// Returns [`DocstampError::DocsRootNotFound`] when `root` is not an
    /// existing directory.
    pub fn select(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(DocstampError::DocsRootNotFound {
                path: root.display().to_string(),
            }
            .into());
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                trace!("Checking path: {}", relative.display());
                if self.matches(relative) {
                    matches.push(relative.to_path_buf());
                }
            }
        }

        matches.sort();
        debug!("Selected {} file(s) under {}", matches.len(), root.display());
        Ok(matches)
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|raw| {
            validate_pattern_safety(raw)?;
            Pattern::new(raw)
                .map_err(|e| {
                    DocstampError::InvalidPattern {
                        pattern: raw.clone(),
                        reason: e.to_string(),
                    }
                    .into()
                })
        })
        .collect()
}

/// Reject patterns that could select files outside the docs root.
///
/// Checks for path traversal (`..`), Unix absolute paths, and Windows
/// absolute/UNC paths. Patterns are matched against root-relative paths,
/// so none of these can ever be legitimate.
pub fn validate_pattern_safety(pattern: &str) -> Result<()> {
    if pattern.contains("..") {
        return Err(DocstampError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "path traversal (..) is not allowed".to_string(),
        }
        .into());
    }

    if pattern.starts_with('/') || pattern.contains(':') || pattern.starts_with('\\') {
        return Err(DocstampError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "absolute paths are not allowed".to_string(),
        }
        .into());
    }

    Ok(())
}
