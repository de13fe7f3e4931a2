//! Repository queries built on [`GitRunner`].

use gitsmart_core::{BranchName, RemoteName};

use crate::error::{CommandError, DefaultBranchError};
use crate::parse;
use crate::runner::GitRunner;

/// True iff the working directory is inside a git work tree.
pub fn is_repository(git: &dyn GitRunner) -> bool {
    git.run(&["rev-parse", "--is-inside-work-tree"]).is_ok()
}

/// Abbreviated ref name of `HEAD`.
pub fn current_branch(git: &dyn GitRunner) -> Result<BranchName, CommandError> {
    git.run(&["rev-parse", "--abbrev-ref", "HEAD"])
        .map(BranchName::from)
}

/// Default branch of `remote`, read from the `HEAD branch:` line of
/// `git remote show <remote>`.
pub fn default_branch(
    git: &dyn GitRunner,
    remote: &RemoteName,
) -> Result<BranchName, DefaultBranchError> {
    let output = git
        .run(&["remote", "show", remote.as_str()])
        .map_err(|source| DefaultBranchError::RemoteQuery {
            remote: remote.clone(),
            source,
        })?;

    parse::head_branch(&output)
        .map(BranchName::from)
        .ok_or_else(|| DefaultBranchError::MarkerMissing {
            remote: remote.clone(),
        })
}

/// Whether `git status --porcelain` reports anything.
pub fn has_local_changes(git: &dyn GitRunner) -> Result<bool, CommandError> {
    git.run(&["status", "--porcelain"])
        .map(|status| !status.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Answers from a fixed table keyed on the joined argument list.
    struct Canned(HashMap<&'static str, Result<&'static str, &'static str>>);

    impl GitRunner for Canned {
        fn run(&self, args: &[&str]) -> Result<String, CommandError> {
            match self.0.get(args.join(" ").as_str()) {
                Some(Ok(out)) => Ok((*out).to_owned()),
                Some(Err(out)) => Err(CommandError::failed(args, *out)),
                None => Err(CommandError::failed(args, "unexpected command")),
            }
        }
    }

    fn canned(entries: &[(&'static str, Result<&'static str, &'static str>)]) -> Canned {
        Canned(entries.iter().cloned().collect())
    }

    #[test]
    fn repository_probe_follows_exit_status() {
        let inside = canned(&[("rev-parse --is-inside-work-tree", Ok("true"))]);
        let outside = canned(&[(
            "rev-parse --is-inside-work-tree",
            Err("fatal: not a git repository (or any of the parent directories): .git"),
        )]);
        assert!(is_repository(&inside));
        assert!(!is_repository(&outside));
    }

    #[test]
    fn current_branch_is_abbrev_ref() {
        let git = canned(&[("rev-parse --abbrev-ref HEAD", Ok("feature/x"))]);
        assert_eq!(current_branch(&git).unwrap(), BranchName::from("feature/x"));
    }

    #[test]
    fn default_branch_uses_configured_remote() {
        let git = canned(&[("remote show upstream", Ok("* remote upstream\n  HEAD branch: trunk"))]);
        let branch = default_branch(&git, &RemoteName::from("upstream")).unwrap();
        assert_eq!(branch, BranchName::from("trunk"));
    }

    #[test]
    fn default_branch_query_failure_keeps_cause() {
        let git = canned(&[(
            "remote show origin",
            Err("fatal: 'origin' does not appear to be a git repository"),
        )]);
        let err = default_branch(&git, &RemoteName::default()).unwrap_err();
        match err {
            DefaultBranchError::RemoteQuery { remote, source } => {
                assert_eq!(remote.as_str(), "origin");
                assert!(source.to_string().contains("does not appear"));
            }
            other => panic!("expected RemoteQuery, got {other:?}"),
        }
    }

    #[test]
    fn default_branch_without_marker_is_error() {
        let git = canned(&[("remote show origin", Ok("* remote origin\n  Fetch URL: x"))]);
        let err = default_branch(&git, &RemoteName::default()).unwrap_err();
        assert!(matches!(err, DefaultBranchError::MarkerMissing { .. }));
    }

    #[test]
    fn porcelain_status_detects_changes() {
        let dirty = canned(&[("status --porcelain", Ok(" M src/lib.rs"))]);
        let clean = canned(&[("status --porcelain", Ok(""))]);
        assert!(has_local_changes(&dirty).unwrap());
        assert!(!has_local_changes(&clean).unwrap());
    }
}
