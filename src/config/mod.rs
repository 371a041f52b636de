//! Project configuration (`docstamp.toml`) parsing and validation.
//!
//! A docs project configures docstamp through a small TOML file at the
//! project root. Every table and field is optional; missing values fall
//! back to the compiled defaults in [`crate::constants`], so an absent
//! file behaves exactly like `docstamp init`'s template with nothing
//! uncommented.
//!
//! ```toml
//! [rewrite]
//! placeholder = "[[< current-version >]]"
//! default-version = "1.7.0"
//! on-unresolved = "default"        # or "error"
//! multiple-segments = "first-wins" # or "error"
//! # path-token = "[[< current-path >]]"
//!
//! [files]
//! include = ["**/*.md", "**/*.mdx"]
//! exclude = []
//!
//! [build]
//! max-parallel = 8
//! ```
//!
//! CLI flags override file values; the merge happens in the command
//! layer, not here. Loading never touches the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_INCLUDE_PATTERNS, DEFAULT_PLACEHOLDER, DEFAULT_VERSION,
};
use crate::core::DocstampError;
use crate::rewriter::{RewriteOptions, SegmentPolicy, UnresolvedPolicy};

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_include() -> Vec<String> {
    DEFAULT_INCLUDE_PATTERNS.iter().map(ToString::to_string).collect()
}

/// The `[rewrite]` table: options for the placeholder transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RewriteConfig {
    /// Literal placeholder token replaced in page content.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Version substituted for pages outside any versioned directory.
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Lenient default substitution, or a hard error per page.
    #[serde(default)]
    pub on_unresolved: UnresolvedPolicy,

    /// First-wins or hard error for paths with several version segments.
    #[serde(default)]
    pub multiple_segments: SegmentPolicy,

    /// Optional token replaced with the page's normalized path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_token: Option<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            default_version: default_version(),
            on_unresolved: UnresolvedPolicy::default(),
            multiple_segments: SegmentPolicy::default(),
            path_token: None,
        }
    }
}

/// The `[files]` table: which pages a bulk run touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilesConfig {
    /// Glob patterns, relative to the docs root, selecting pages.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Glob patterns removing pages from the selection.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

/// The `[build]` table: pipeline tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Maximum concurrent file rewrites. Defaults to
    /// [`crate::constants::default_parallelism`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
}

/// Parsed `docstamp.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Placeholder-rewrite options.
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// File selection for bulk runs.
    #[serde(default)]
    pub files: FilesConfig,

    /// Pipeline tuning.
    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DocstampError::ConfigNotFound`] when the file is
    /// missing, [`DocstampError::ConfigParseError`] for invalid TOML,
    /// and [`DocstampError::ConfigValidationError`] for parseable but
    /// unusable values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocstampError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&raw).map_err(|e| DocstampError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a command invocation.
    ///
    /// An explicit `--config` path must exist. Otherwise
    /// `docstamp.toml` is read from the current directory when present,
    /// and pure defaults apply when it is not.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serialize and write the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, raw)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Check values that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.build.max_parallel {
            return Err(DocstampError::ConfigValidationError {
                reason: "build.max-parallel must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Build rewriter options from the `[rewrite]` table.
    #[must_use]
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            placeholder: self.rewrite.placeholder.clone(),
            default_version: self.rewrite.default_version.clone(),
            on_unresolved: self.rewrite.on_unresolved,
            multiple_segments: self.rewrite.multiple_segments,
            path_token: self.rewrite.path_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.rewrite.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(config.rewrite.default_version, DEFAULT_VERSION);
        assert_eq!(config.rewrite.on_unresolved, UnresolvedPolicy::Default);
        assert_eq!(config.rewrite.multiple_segments, SegmentPolicy::FirstWins);
        assert_eq!(config.files.include, vec!["**/*.md", "**/*.mdx"]);
        assert!(config.files.exclude.is_empty());
        assert!(config.build.max_parallel.is_none());
    }

    #[test]
    fn test_empty_file_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[rewrite]
default-version = "2.4"
"#,
        )
        .unwrap();
        assert_eq!(config.rewrite.default_version, "2.4");
        assert_eq!(config.rewrite.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_full_round_trip() {
        let config: Config = toml::from_str(
            r#"
[rewrite]
placeholder = "{{v}}"
default-version = "3.0.1"
on-unresolved = "error"
multiple-segments = "error"
path-token = "{{p}}"

[files]
include = ["docs/**/*.md"]
exclude = ["**/draft-*.md"]

[build]
max-parallel = 4
"#,
        )
        .unwrap();

        assert_eq!(config.rewrite.on_unresolved, UnresolvedPolicy::Error);
        assert_eq!(config.rewrite.multiple_segments, SegmentPolicy::Error);
        assert_eq!(config.rewrite.path_token.as_deref(), Some("{{p}}"));
        assert_eq!(config.build.max_parallel, Some(4));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("docstamp.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocstampError>(),
            Some(DocstampError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docstamp.toml");
        std::fs::write(&path, "[rewrite\nplaceholder = ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocstampError>(),
            Some(DocstampError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docstamp.toml");
        std::fs::write(&path, "[build]\nmax-parallel = 0\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocstampError>(),
            Some(DocstampError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("docstamp.toml");

        let mut config = Config::default();
        config.rewrite.default_version = "5.0".to_string();
        config.save(&path).unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_rewrite_options_mirror_config() {
        let mut config = Config::default();
        config.rewrite.default_version = "2.2".to_string();
        config.rewrite.on_unresolved = UnresolvedPolicy::Error;

        let options = config.rewrite_options();
        assert_eq!(options.default_version, "2.2");
        assert_eq!(options.on_unresolved, UnresolvedPolicy::Error);
        assert_eq!(options.placeholder, DEFAULT_PLACEHOLDER);
    }
}
