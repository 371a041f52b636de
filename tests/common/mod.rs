//! Common test utilities for docstamp integration tests.

// Allow dead code because these utilities are shared across test files
// and not every helper is used in every file
#![allow(dead_code)]

use anyhow::{Context, Result};
use docstamp::test_utils::DocsFixture;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output of a docstamp invocation.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// A temporary project: a docs tree plus an optional docstamp.toml,
/// with the real binary run against it.
pub struct TestProject {
    fixture: DocsFixture,
}

impl TestProject {
    /// Create an empty project with a `docs/` subtree.
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: DocsFixture::new()?,
        })
    }

    /// The project root (where docstamp.toml lives and commands run).
    pub fn project_path(&self) -> &Path {
        self.fixture.root()
    }

    /// The docs root passed to `process`/`check`.
    pub fn docs_path(&self) -> PathBuf {
        self.fixture.root().join("docs")
    }

    /// Create a page under `docs/`.
    pub fn add_page(&self, relative: &str, content: &str) -> Result<()> {
        self.fixture.add_page(&format!("docs/{relative}"), content)?;
        Ok(())
    }

    /// Read a page back from `docs/`.
    pub fn read_page(&self, relative: &str) -> Result<String> {
        self.fixture.read_page(&format!("docs/{relative}"))
    }

    /// Write a docstamp.toml in the project root.
    pub fn write_config(&self, content: &str) -> Result<()> {
        self.fixture.add_page("docstamp.toml", content)?;
        Ok(())
    }

    /// Run a docstamp command in the project directory.
    pub fn run_docstamp(&self, args: &[&str]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_docstamp");
        let output = Command::new(binary)
            .args(args)
            .current_dir(self.project_path())
            .env("NO_COLOR", "1")
            .env("DOCSTAMP_NO_PROGRESS", "1")
            .output()
            .context("Failed to run docstamp command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}
