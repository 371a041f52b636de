//! docstamp - version stamping for versioned documentation trees
//!
//! Documentation sites that keep one directory per release
//! (`docs/version-1.6.2/`, `docs/version-1.7.0/`, ...) end up writing
//! the version number into page text hundreds of times. docstamp lets
//! authors write a placeholder token instead and resolves it at build
//! time from each page's path:
//!
//! - a page under `/docs/version-2.0.1/` has its placeholders replaced
//!   with `2.0.1`
//! - a page outside any versioned directory falls back to a configured
//!   default version
//! - after a run, no literal placeholder remains anywhere in the output
//!
//! # Core Modules
//!
//! - [`rewriter`] - the placeholder transform itself, one call per page
//! - [`version`] - dotted version identifiers and path-segment extraction
//! - [`config`] - `docstamp.toml` parsing and defaults
//! - [`pattern`] - include/exclude glob selection of pages
//! - [`pipeline`] - concurrent bulk processing of a docs tree
//! - [`cli`] - the `init`, `process`, and `check` commands
//! - [`core`] - error types and user-friendly CLI error display
//!
//! # Configuration (docstamp.toml)
//!
//! ```toml
//! [rewrite]
//! placeholder = "[[< current-version >]]"
//! default-version = "1.7.0"
//! on-unresolved = "default"        # or "error" to fail the build
//! multiple-segments = "first-wins" # or "error"
//!
//! [files]
//! include = ["**/*.md", "**/*.mdx"]
//! exclude = ["**/draft-*.md"]
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Create a commented docstamp.toml
//! docstamp init
//!
//! # Stamp a docs tree in place
//! docstamp process ./content/docs
//!
//! # Stamp into a separate output tree, sources untouched
//! docstamp process ./content/docs --out-dir ./build/docs
//!
//! # CI gate: nonzero exit on stray placeholders
//! docstamp check ./content/docs --format json
//! ```
//!
//! # Library Usage
//!
//! The rewriter is a pure transform usable without the CLI, one call per
//! `(path, content)` pair supplied by a host build pipeline:
//!
//! ```
//! use docstamp::rewriter::{RewriteOptions, Rewriter};
//!
//! let rewriter = Rewriter::new(RewriteOptions::default())?;
//! let out = rewriter.rewrite(
//!     "/docs/version-2.0.1/intro.md",
//!     "See [[< current-version >]] for details.",
//! )?;
//! assert_eq!(out.content, "See 2.0.1 for details.");
//! # Ok::<(), docstamp::core::DocstampError>(())
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// The transform and its inputs
pub mod pattern;
pub mod rewriter;
pub mod version;

// Bulk processing
pub mod pipeline;

// Supporting modules
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
