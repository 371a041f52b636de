//! Initialize a project with a `docstamp.toml` template.
//!
//! Creates a commented configuration file in the target directory. Every
//! value in the template is commented out and matches the compiled
//! defaults, so the generated file changes nothing until edited.
//!
//! # Examples
//!
//! ```bash
//! docstamp init
//! docstamp init --path ./website
//! docstamp init --force
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::constants::CONFIG_FILE_NAME;

const CONFIG_TEMPLATE: &str = r#"# docstamp configuration
# Values shown are the defaults; uncomment to override.

[rewrite]
# The literal token replaced in page content. Exact match only.
# placeholder = "[[< current-version >]]"

# Version substituted for pages outside any version-N.N directory.
# default-version = "1.7.0"

# "default" substitutes default-version; "error" fails the build instead.
# on-unresolved = "default"

# "first-wins" or "error" for paths encoding several version segments.
# multiple-segments = "first-wins"

# Optional token replaced with the page's path, for tracing output back
# to its source file.
# path-token = "[[< current-path >]]"

[files]
# Globs are relative to the docs root passed to `docstamp process`.
# include = ["**/*.md", "**/*.mdx"]
# exclude = []

[build]
# Concurrent file rewrites; defaults to 2x CPU cores (minimum 10).
# max-parallel = 8
"#;

/// Command to write a `docstamp.toml` template.
#[derive(Args)]
pub struct InitCommand {
    /// Directory to create the configuration in (defaults to the
    /// current directory; created if missing)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing docstamp.toml
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub async fn execute(self) -> Result<()> {
        let target_dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(anyhow!(
                "Configuration already exists at {}. Use --force to overwrite",
                config_path.display()
            ));
        }

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)?;
        }

        fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("{} Initialized {}", "✓".green(), config_path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Stamp your docs tree with {}", "docstamp process <docs-root>".bright_white());
        println!("  Gate CI on stray placeholders with {}", "docstamp check".bright_white());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_config() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            path: Some(temp.path().to_path_buf()),
            force: false,
        };

        cmd.execute().await.unwrap();

        let config_path = temp.path().join(CONFIG_FILE_NAME);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[rewrite]"));
        assert!(content.contains("[files]"));
        assert!(content.contains("[build]"));
    }

    #[tokio::test]
    async fn test_init_template_parses_to_defaults() {
        // Everything is commented out, so the template must load as the
        // default configuration.
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            path: Some(temp.path().to_path_buf()),
            force: false,
        };
        cmd.execute().await.unwrap();

        let config = Config::load(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_init_fails_if_config_exists() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "existing content").unwrap();

        let cmd = InitCommand {
            path: Some(temp.path().to_path_buf()),
            force: false,
        };

        let result = cmd.execute().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing content");
    }

    #[tokio::test]
    async fn test_init_force_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "old content").unwrap();

        let cmd = InitCommand {
            path: Some(temp.path().to_path_buf()),
            force: true,
        };

        cmd.execute().await.unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("# docstamp configuration"));
        assert!(!content.contains("old content"));
    }

    #[tokio::test]
    async fn test_init_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let cmd = InitCommand {
            path: Some(nested.clone()),
            force: false,
        };

        cmd.execute().await.unwrap();
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }
}
