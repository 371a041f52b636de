//! Cross-platform path utilities shared by the rewriter and the pipeline.
//!
//! Versioned path segments are matched against `/`-separated paths, so
//! everything that feeds a path into the rewriter funnels through
//! [`normalize_path_separator`] first. This keeps the path convention
//! separator-agnostic: `C:\docs\version-1.2\intro.md` and
//! `/docs/version-1.2/intro.md` both expose the same `version-1.2`
//! component.

use std::path::Path;

/// Convert a path to a string with forward-slash separators.
///
/// On Windows this converts backslashes to forward slashes; on Unix it is
/// a plain lossy conversion. The result is used for version-segment
/// matching and for user-facing display, never handed back to the
/// filesystem.
///
/// # Examples
///
/// ```
/// use docstamp::utils::normalize_path_separator;
/// use std::path::Path;
///
/// let normalized = normalize_path_separator(Path::new("docs/version-1.2/intro.md"));
/// assert_eq!(normalized, "docs/version-1.2/intro.md");
/// ```
pub fn normalize_path_separator(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_path_separator_forward_slashes_untouched() {
        let path = Path::new("docs/version-1.2/intro.md");
        assert_eq!(normalize_path_separator(path), "docs/version-1.2/intro.md");
    }

    #[test]
    fn test_normalize_path_separator_converts_backslashes() {
        // Backslashes are plain characters on Unix but still normalize, so
        // the same assertion holds on every platform.
        let raw = PathBuf::from(r"docs\version-1.2\intro.md");
        assert_eq!(normalize_path_separator(&raw), "docs/version-1.2/intro.md");
    }

}
