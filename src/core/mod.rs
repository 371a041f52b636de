//! Core types and error handling for docstamp.
//!
//! This module hosts the foundation the rest of the crate builds on:
//!
//! - [`error`] - the [`DocstampError`] taxonomy, the suggestion-bearing
//!   [`ErrorContext`] wrapper, and [`user_friendly_error`] for CLI display
//!
//! Every operation that can fail returns a [`Result`] with meaningful
//! error information; user-facing failures are routed through
//! [`user_friendly_error`] exactly once, at the binary's exit path.

pub mod error;

pub use error::{DocstampError, ErrorContext, user_friendly_error};
