//! Shared helpers for unit and integration tests.
//!
//! Available to integration tests through the `test-utils` feature
//! (the crate dev-depends on itself with that feature enabled):
//!
//! ```toml
//! [dev-dependencies]
//! docstamp = { path = ".", features = ["test-utils"] }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Honors `RUST_LOG` when set; otherwise uses the provided level, or
/// stays silent when neither is given. Safe to call from every test;
/// only the first call installs a subscriber.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A temporary docs tree for exercising the rewriter and pipeline.
///
/// Pages are created under a [`TempDir`] that is removed on drop.
///
/// # Examples
///
/// ```rust,no_run
/// use docstamp::test_utils::DocsFixture;
///
/// # fn example() -> anyhow::Result<()> {
/// let fixture = DocsFixture::new()?;
/// fixture.add_page("version-1.2/intro.md", "v [[< current-version >]]")?;
/// fixture.add_page("about.md", "unversioned")?;
/// # Ok(())
/// # }
/// ```
pub struct DocsFixture {
    temp: TempDir,
}

impl DocsFixture {
    /// Create an empty docs tree.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temporary directory")?,
        })
    }

    /// The root of the docs tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Create a page (and any parent directories) under the root.
    pub fn add_page(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write page: {}", path.display()))?;
        Ok(path)
    }

    /// Read a page back.
    pub fn read_page(&self, relative: &str) -> Result<String> {
        let path = self.temp.path().join(relative);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read page: {}", path.display()))
    }
}
