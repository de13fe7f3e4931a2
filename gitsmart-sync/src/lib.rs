//! # gitsmart-sync
//!
//! Branch-sync workflow engine.
//!
//! Call [`workflow::run`] with a [`GitRunner`] and a [`Reporter`] to stash,
//! pull the default branch, rebase the current branch onto it, and restore
//! the stash, with best-effort rollback when an intermediate step fails.

pub mod error;
pub mod git;
pub mod parse;
pub mod report;
pub mod runner;
pub mod workflow;

pub use error::{CommandError, DefaultBranchError, ErrorKind, SyncError};
pub use report::{Category, NullReporter, RecordingReporter, Reporter};
pub use runner::{GitRunner, ProcessGit};
pub use workflow::{Branches, State, StashOutcome, SyncOptions, SyncOutcome, SyncWorkflow};
