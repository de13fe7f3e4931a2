//! Error types for gitsmart-sync.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

use gitsmart_core::{BranchName, RemoteName};

/// Failure of a single git invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// git ran and exited non-zero. The message is the trimmed combined
    /// output so callers can match on known phrases.
    #[error("{output}")]
    Failed { args: Vec<String>, output: String },

    /// The git program could not be started at all.
    #[error("failed to execute {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Convenience constructor for [`CommandError::Failed`].
    pub fn failed(args: &[&str], output: impl Into<String>) -> Self {
        Self::Failed {
            args: args.iter().map(|a| (*a).to_owned()).collect(),
            output: output.into(),
        }
    }

    /// Text a caller can show or pattern-match on: git's own output for
    /// [`CommandError::Failed`], the spawn failure otherwise.
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Self::Failed { output, .. } => Cow::Borrowed(output),
            Self::Spawn { .. } => Cow::Owned(self.to_string()),
        }
    }
}

/// Why the default branch of a remote could not be determined.
#[derive(Debug, Error)]
pub enum DefaultBranchError {
    #[error("could not query remote '{remote}': {source}")]
    RemoteQuery {
        remote: RemoteName,
        #[source]
        source: CommandError,
    },

    /// The remote answered but reported no `HEAD branch:`.
    #[error("could not determine default branch from 'git remote show {remote}'")]
    MarkerMissing { remote: RemoteName },
}

/// Fatal outcome of a sync run. The variant names the step that failed;
/// compensating actions never replace it.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("not a git repository")]
    NotARepository,

    #[error("error getting default branch: {0}")]
    DefaultBranch(#[from] DefaultBranchError),

    #[error("error getting current branch: {0}")]
    BranchResolution(#[source] CommandError),

    #[error("error checking status: {0}")]
    Status(#[source] CommandError),

    #[error("error stashing changes: {0}")]
    Stash(#[source] CommandError),

    #[error("error checking out '{branch}': {source}")]
    Checkout {
        branch: BranchName,
        #[source]
        source: CommandError,
    },

    #[error("error pulling '{branch}': {source}")]
    Pull {
        branch: BranchName,
        #[source]
        source: CommandError,
    },

    /// The rebase stopped; the user has to resolve conflicts and run
    /// `git rebase --continue`. `stash_kept` is true when local changes
    /// are still sitting in the stash.
    #[error("rebase onto '{onto}' stopped with conflicts")]
    RebaseConflict {
        onto: BranchName,
        output: String,
        stash_kept: bool,
    },

    #[error("error popping stash, your stash is still saved: {output}")]
    StashPop { output: String },
}

/// Fieldless mirror of [`SyncError`] for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotARepository,
    DefaultBranch,
    BranchResolution,
    Status,
    Stash,
    Checkout,
    Pull,
    RebaseConflict,
    StashPop,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotARepository => ErrorKind::NotARepository,
            Self::DefaultBranch(_) => ErrorKind::DefaultBranch,
            Self::BranchResolution(_) => ErrorKind::BranchResolution,
            Self::Status(_) => ErrorKind::Status,
            Self::Stash(_) => ErrorKind::Stash,
            Self::Checkout { .. } => ErrorKind::Checkout,
            Self::Pull { .. } => ErrorKind::Pull,
            Self::RebaseConflict { .. } => ErrorKind::RebaseConflict,
            Self::StashPop { .. } => ErrorKind::StashPop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_command_displays_raw_output() {
        let err = CommandError::failed(&["stash", "pop"], "No stash entries found.");
        assert_eq!(err.to_string(), "No stash entries found.");
    }

    #[test]
    fn message_borrows_failed_output() {
        let err = CommandError::failed(&["rebase", "main"], "CONFLICT (content)");
        assert!(matches!(err.message(), Cow::Borrowed("CONFLICT (content)")));

        let spawn = CommandError::Spawn {
            program: PathBuf::from("no-such-git"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = spawn.message();
        assert!(matches!(message, Cow::Owned(_)));
        assert!(message.contains("no-such-git"), "got: {message}");
    }

    #[test]
    fn checkout_error_names_branch_and_cause() {
        let err = SyncError::Checkout {
            branch: BranchName::from("main"),
            source: CommandError::failed(&["checkout", "main"], "error: pathspec"),
        };
        assert_eq!(err.kind(), ErrorKind::Checkout);
        assert_eq!(err.to_string(), "error checking out 'main': error: pathspec");
    }

    #[test]
    fn default_branch_error_converts() {
        let err: SyncError = DefaultBranchError::MarkerMissing {
            remote: RemoteName::from("origin"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::DefaultBranch);
        assert!(err.to_string().contains("git remote show origin"));
    }
}
