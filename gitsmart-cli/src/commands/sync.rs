//! `git-smart sync` — rebase the current branch onto the freshly pulled
//! default branch, carrying uncommitted changes across in the stash.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use gitsmart_core::config;
use gitsmart_sync::{workflow, ProcessGit, SyncOptions};

use crate::terminal::TerminalReporter;

/// Arguments for `git-smart sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {}

impl SyncArgs {
    /// Returns [`ExitCode::FAILURE`] when the workflow stops; the reporter
    /// has already told the user why and what to do next.
    pub fn run(self) -> Result<ExitCode> {
        let config = config::load().context("failed to load git-smart config")?;
        let git = ProcessGit::from_config(&config);
        let mut reporter = TerminalReporter::default();

        match workflow::run(&git, &mut reporter, &SyncOptions::from(&config)) {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "sync failed: {err}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
