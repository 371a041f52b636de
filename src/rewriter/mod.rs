//! The version-placeholder rewriter, docstamp's core transform.
//!
//! Authored documentation pages embed a fixed placeholder token (by
//! default `[[< current-version >]]`) wherever the page should display
//! the version it documents. The rewriter resolves that token from the
//! page's *path*: a `version-N(.N)*` directory component supplies the
//! version, and pages outside any versioned directory fall back to a
//! configured default. After a rewrite no literal placeholder ever
//! survives in produced output: the downstream renderer never sees an
//! unresolved template marker.
//!
//! The transform is pure and total over string inputs in the default
//! lenient mode. Two configured policies make it fallible instead:
//!
//! - `on-unresolved = "error"` refuses the default fallback, turning a
//!   placeholder outside a versioned directory into a build error
//! - `multiple-segments = "error"` rejects paths that encode more than
//!   one version segment instead of applying first-wins
//!
//! # Examples
//!
//! ```
//! use docstamp::rewriter::{RewriteOptions, Rewriter};
//!
//! let rewriter = Rewriter::new(RewriteOptions::default()).unwrap();
//!
//! let out = rewriter
//!     .rewrite("/docs/version-2.0.1/intro.md", "See [[< current-version >]] for details.")
//!     .unwrap();
//! assert_eq!(out.content, "See 2.0.1 for details.");
//!
//! let out = rewriter
//!     .rewrite("/docs/intro.md", "Default is [[< current-version >]].")
//!     .unwrap();
//! assert_eq!(out.content, "Default is 1.7.0.");
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PLACEHOLDER, DEFAULT_VERSION};
use crate::core::DocstampError;
use crate::version::{DottedVersion, extract_versions};

/// What to do when content contains the placeholder but the path carries
/// no version segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Substitute the configured default version (lenient; the shipped
    /// behavior of the original build).
    #[default]
    Default,
    /// Fail the rewrite so the build surfaces the stray placeholder.
    Error,
}

/// What to do when a path encodes more than one version segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentPolicy {
    /// The first (leftmost) segment wins; later segments are ignored.
    #[default]
    FirstWins,
    /// Treat the path as invalid input and fail the rewrite.
    Error,
}

/// Options controlling a [`Rewriter`].
///
/// All state the rewrite needs is here, passed in at construction time.
/// there is no hidden global configuration read at call time, so a build
/// can override any of it without editing code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// The literal token replaced in page content. Exact match only.
    pub placeholder: String,
    /// Version substituted when the path carries no version segment.
    pub default_version: String,
    /// Policy for placeholders outside versioned directories.
    pub on_unresolved: UnresolvedPolicy,
    /// Policy for paths with more than one version segment.
    pub multiple_segments: SegmentPolicy,
    /// Optional extra token replaced with the page's (normalized) path.
    /// A debugging aid for tracing which file produced which output;
    /// off by default.
    pub path_token: Option<String>,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            default_version: DEFAULT_VERSION.to_string(),
            on_unresolved: UnresolvedPolicy::default(),
            multiple_segments: SegmentPolicy::default(),
            path_token: None,
        }
    }
}

/// Where the substituted version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    /// Extracted from a versioned path segment.
    Path,
    /// The configured default version.
    Default,
}

/// Per-file accounting of what a rewrite did (or would do).
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    /// Number of placeholder occurrences replaced.
    pub replacements: usize,
    /// The version that applies to this file, whether or not the content
    /// contained the placeholder.
    pub version: String,
    /// Whether the version came from the path or the default.
    pub source: VersionSource,
}

/// The result of a rewrite: the transformed content plus its outcome
/// report.
#[derive(Debug, Clone)]
pub struct Rewritten {
    /// The transformed content. The input is never mutated in place.
    pub content: String,
    /// Accounting used by `process`/`check` reporting.
    pub outcome: RewriteOutcome,
}

/// Stateless placeholder rewriter.
///
/// Construction validates the options once; after that the rewriter is
/// `Send + Sync` and can be shared freely across concurrent per-file
/// rewrites. It reads no shared mutable state and performs no I/O.
#[derive(Debug, Clone)]
pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    /// Create a rewriter, validating the options.
    ///
    /// # Errors
    ///
    /// Returns [`DocstampError::ConfigValidationError`] if the
    /// placeholder is empty, or [`DocstampError::InvalidDefaultVersion`]
    /// if the default version is not a dot-separated digit sequence (it
    /// is substituted verbatim, so it must follow the same grammar as
    /// versioned directory names).
    pub fn new(options: RewriteOptions) -> Result<Self, DocstampError> {
        if options.placeholder.is_empty() {
            return Err(DocstampError::ConfigValidationError {
                reason: "placeholder must not be empty".to_string(),
            });
        }
        if options.default_version.parse::<DottedVersion>().is_err() {
            return Err(DocstampError::InvalidDefaultVersion {
                value: options.default_version.clone(),
            });
        }
        Ok(Self {
            options,
        })
    }

    /// The validated options this rewriter was built with.
    #[must_use]
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite one page.
    ///
    /// The path is only pattern-matched, never modified or returned. The
    /// content is transformed into a new string:
    ///
    /// 1. Version segments are extracted from the path. With more than
    ///    one match, the first (leftmost) wins, or the rewrite fails
    ///    under [`SegmentPolicy::Error`].
    /// 2. Every occurrence of the placeholder becomes the winning
    ///    version, or the default when no segment matched (failing
    ///    instead under [`UnresolvedPolicy::Error`]).
    /// 3. If a path token is configured, its occurrences become the
    ///    normalized path.
    ///
    /// Content without the placeholder is returned unchanged, and the
    /// output never contains the literal placeholder.
    ///
    /// # Errors
    ///
    /// Only under the strict policies described above; with default
    /// options this function is infallible for all string inputs.
    pub fn rewrite(&self, file_path: &str, file_content: &str) -> Result<Rewritten, DocstampError> {
        let versions = extract_versions(file_path);

        if versions.len() > 1 && self.options.multiple_segments == SegmentPolicy::Error {
            return Err(DocstampError::MultipleVersionSegments {
                path: file_path.to_string(),
                versions: versions
                    .iter()
                    .map(DottedVersion::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let (version, source) = match versions.first() {
            Some(v) => (v.as_str().to_string(), VersionSource::Path),
            None => (self.options.default_version.clone(), VersionSource::Default),
        };

        let replacements = file_content.matches(&self.options.placeholder).count();

        if replacements > 0
            && source == VersionSource::Default
            && self.options.on_unresolved == UnresolvedPolicy::Error
        {
            return Err(DocstampError::UnresolvedPlaceholder {
                path: file_path.to_string(),
                occurrences: replacements,
            });
        }

        let mut content = if replacements == 0 {
            file_content.to_string()
        } else {
            file_content.replace(&self.options.placeholder, &version)
        };

        if let Some(token) = &self.options.path_token {
            content = content.replace(token.as_str(), &file_path.replace('\\', "/"));
        }

        Ok(Rewritten {
            content,
            outcome: RewriteOutcome {
                replacements,
                version,
                source,
            },
        })
    }
}
