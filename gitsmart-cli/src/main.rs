//! git-smart — keep a feature branch current with the default branch.
//!
//! # Usage
//!
//! ```text
//! git-smart sync
//! ```

mod commands;
mod terminal;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::sync::SyncArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "git-smart",
    version,
    about = "Automate routine git workflows",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stash changes, sync with the default branch (main/master), and pop the stash.
    #[command(long_about = "\
Automates the common workflow of keeping a feature branch up-to-date.
It performs the following steps:
1. Gets the current branch name.
2. Stashes uncommitted changes (if any).
3. Checks out the default branch (e.g., main or master).
4. Pulls the latest changes for the default branch.
5. Checks out the original feature branch.
6. Rebases the default branch onto the feature branch.
7. Pops the stash (if anything was stashed).")]
    Sync(SyncArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
