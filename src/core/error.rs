//! Error handling for docstamp.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`DocstampError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! Library code returns [`DocstampError`] (or `anyhow::Result` with context
//! attached); the CLI entry point funnels every failure through
//! [`user_friendly_error`] so the terminal output carries a suggestion and,
//! where useful, extra detail.
//!
//! Note that the core rewrite is total in lenient mode: a path without a
//! version segment is not an error, it falls through to the default
//! substitution. The variants here cover configuration problems, file
//! selection problems, I/O, and the two strict-mode validation failures
//! ([`DocstampError::UnresolvedPlaceholder`] and
//! [`DocstampError::MultipleVersionSegments`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use docstamp::core::{DocstampError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(DocstampError::ConfigNotFound { path: "docstamp.toml".to_string() }.into())
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(e);
//!     ctx.display(); // colored error + suggestion on stderr
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for docstamp operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to explain it: file paths, pattern strings, occurrence counts.
/// Messages are written for end users, not just developers.
#[derive(Error, Debug)]
pub enum DocstampError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// The configuration file exists but is not valid TOML or has an
    /// invalid shape.
    #[error("Failed to parse {file}: {reason}")]
    ConfigParseError {
        /// The configuration file being parsed
        file: String,
        /// Parser output describing the problem
        reason: String,
    },

    /// The configuration parsed but contains unusable values.
    #[error("Invalid configuration: {reason}")]
    ConfigValidationError {
        /// What was wrong with the configuration
        reason: String,
    },

    /// A string does not follow the dotted numeric version grammar.
    #[error("Invalid version segment '{segment}': expected digits separated by single dots")]
    InvalidVersionSegment {
        /// The rejected segment value
        segment: String,
    },

    /// A default-version override is not a dot-separated digit sequence.
    #[error("Invalid default version '{value}': expected dot-separated digits like 1.7.0")]
    InvalidDefaultVersion {
        /// The rejected value
        value: String,
    },

    /// Strict mode: content contains the placeholder but the file's path
    /// carries no version segment to resolve it with.
    #[error(
        "Unresolved placeholder in {path}: {occurrences} occurrence(s) outside a versioned directory"
    )]
    UnresolvedPlaceholder {
        /// File whose content still contains the placeholder
        path: String,
        /// Number of placeholder occurrences found
        occurrences: usize,
    },

    /// A path encodes more than one version segment and the
    /// `multiple-segments = "error"` policy is active.
    #[error("Multiple version segments in {path}: {versions}")]
    MultipleVersionSegments {
        /// The offending path
        path: String,
        /// The conflicting segment values, comma separated
        versions: String,
    },

    /// An include/exclude pattern has invalid glob syntax.
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// The docs root given to `process`/`check` does not exist or is not
    /// a directory.
    #[error("Docs root not found: {path}")]
    DocsRootNotFound {
        /// The missing directory
        path: String,
    },

    /// A file operation failed with path context attached.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// What was being attempted (e.g. "read", "write")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied during a file operation.
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied {
        /// What was being attempted
        operation: String,
        /// The path involved
        path: String,
    },

    /// Standard I/O error without richer context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Generic error that doesn't fit other categories.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// A user-friendly error wrapper with optional suggestion and details.
///
/// Wraps an [`anyhow::Error`] for terminal display:
/// - the error itself, red and bold
/// - optional details, yellow
/// - optional suggestion, green
///
/// Built by [`user_friendly_error`] at the CLI boundary.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional actionable suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details, displayed in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`DocstampError`] variants and common wrapped errors
/// ([`std::io::Error`], [`toml::de::Error`]) and attaches tailored
/// suggestions; anything else is passed through with its full `Caused by`
/// chain appended so diagnostics aren't lost.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<DocstampError>() {
        Ok(e) => return create_error_context(e),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(error)
                    .with_suggestion(
                        "Check file ownership, or re-run with permissions to write the docs tree",
                    )
                    .with_details(
                        "docstamp needs read access to every selected page and write access when rewriting in place",
                    );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(error)
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(error)
            .with_suggestion(
                "Check the TOML syntax in docstamp.toml. Verify quotes, brackets, and key names",
            )
            .with_details("Run 'docstamp init --force' to regenerate a known-good template");
    }

    // Generic error: keep the full chain for diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DocstampError::Other {
        message,
    })
}

/// Attach variant-specific suggestions and details to a [`DocstampError`].
fn create_error_context(error: DocstampError) -> ErrorContext {
    match &error {
        DocstampError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'docstamp init' to create a docstamp.toml, or pass --config with the correct path"),

        DocstampError::ConfigParseError {
            ..
        }
        | DocstampError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in docstamp.toml. Verify quotes, brackets, and key names")
            .with_details("Run 'docstamp init --force' to regenerate a known-good template"),

        DocstampError::ConfigValidationError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the offending value in docstamp.toml or the corresponding CLI flag"),

        DocstampError::InvalidDefaultVersion {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a dot-separated digit sequence such as '1.7.0' for default-version")
            .with_details("The default is substituted verbatim, so it must follow the same format as versioned directory names"),

        DocstampError::UnresolvedPlaceholder {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Move the page under a version-N.N directory, or switch on-unresolved back to \"default\"",
            )
            .with_details(
                "Strict mode refuses to fall back to the default version when a placeholder appears outside a versioned directory",
            ),

        DocstampError::MultipleVersionSegments {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Restructure the path so it contains a single version-N.N directory, or set multiple-segments = \"first-wins\"",
            ),

        DocstampError::InvalidPattern {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the glob syntax of the include/exclude patterns in [files]"),

        DocstampError::DocsRootNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass the directory that contains your documentation pages"),

        DocstampError::PermissionDenied {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check file ownership, or re-run with permissions to write the docs tree"),

        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = DocstampError::UnresolvedPlaceholder {
            path: "docs/intro.md".to_string(),
            occurrences: 2,
        };
        assert_eq!(
            err.to_string(),
            "Unresolved placeholder in docs/intro.md: 2 occurrence(s) outside a versioned directory"
        );

        let err = DocstampError::MultipleVersionSegments {
            path: "/v/version-1.0/version-2.0/a.md".to_string(),
            versions: "1.0, 2.0".to_string(),
        };
        assert!(err.to_string().contains("1.0, 2.0"));
    }

    #[test]
    fn test_error_context_builder_and_display_string() {
        let ctx = ErrorContext::new(DocstampError::ConfigNotFound {
            path: "docstamp.toml".to_string(),
        })
        .with_suggestion("run docstamp init")
        .with_details("searched the working directory");

        let rendered = format!("{ctx}");
        assert!(rendered.contains("Configuration file not found"));
        assert!(rendered.contains("Suggestion: run docstamp init"));
        assert!(rendered.contains("Details: searched the working directory"));
    }

    #[test]
    fn test_user_friendly_error_recognizes_docstamp_errors() {
        let err = anyhow::Error::from(DocstampError::ConfigNotFound {
            path: "docstamp.toml".to_string(),
        });
        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.is_some());
        assert!(ctx.suggestion.unwrap().contains("docstamp init"));
    }

    #[test]
    fn test_user_friendly_error_keeps_generic_chain() {
        let root = anyhow::anyhow!("root cause");
        let err = root.context("outer context");
        let ctx = user_friendly_error(err);
        let message = ctx.error.to_string();
        assert!(message.contains("outer context"));
        assert!(message.contains("Caused by"));
        assert!(message.contains("root cause"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DocstampError = io_err.into();
        assert!(matches!(err, DocstampError::IoError(_)));
    }
}
