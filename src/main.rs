//! docstamp CLI entry point
//!
//! Parses command-line arguments, executes the selected command, and
//! renders failures as user-friendly errors with suggestions:
//! - `init` - write a commented docstamp.toml template
//! - `process` - rewrite version placeholders across a docs tree
//! - `check` - report unresolved placeholders and ambiguous paths

use anyhow::Result;
use clap::Parser;
use docstamp::cli;
use docstamp::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
