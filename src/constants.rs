//! Global constants used throughout the docstamp codebase.
//!
//! This module contains the compiled defaults for the rewrite options,
//! the configuration file name, and parallelism parameters used by the
//! batch pipeline. Defining them centrally improves maintainability and
//! makes magic values more discoverable.

/// Version substituted when a file's path carries no versioned segment.
///
/// This is only the compiled fallback; builds override it through
/// `docstamp.toml` (`default-version`) or `--default-version`.
pub const DEFAULT_VERSION: &str = "1.7.0";

/// The literal placeholder token replaced in page content.
///
/// Must match exactly, byte for byte, for substitution to trigger.
pub const DEFAULT_PLACEHOLDER: &str = "[[< current-version >]]";

/// Directory-name prefix that marks a versioned path segment.
///
/// A segment matches only when this prefix is followed by a dot-separated
/// digit sequence and the component is bounded by separators on both sides.
pub const VERSION_SEGMENT_PREFIX: &str = "version-";

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "docstamp.toml";

/// Default include patterns when no `[files]` section is configured.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.md", "**/*.mdx"];

/// Minimum number of parallel file rewrites regardless of CPU count.
///
/// Rewrites are I/O-bound, so a floor of 10 keeps throughput reasonable
/// even on single-core machines.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default parallelism.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default CPU core count when detection fails.
///
/// Used as a fallback when `std::thread::available_parallelism()` returns an error.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Compute the default number of concurrent file rewrites.
///
/// Uses `cores * PARALLELISM_CORE_MULTIPLIER`, clamped to at least
/// [`MIN_PARALLELISM`].
pub fn default_parallelism() -> usize {
    let cores = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(FALLBACK_CORE_COUNT);
    (cores * PARALLELISM_CORE_MULTIPLIER).max(MIN_PARALLELISM)
}
