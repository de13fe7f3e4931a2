//! Text matching on git output.
//!
//! Everything that depends on the wording of git's human-readable output
//! lives here so it can be hardened without touching the workflow.

use std::sync::OnceLock;

use regex::Regex;

/// Value git prints when the remote has no resolvable HEAD.
const UNKNOWN_HEAD: &str = "(unknown)";

fn head_branch_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"HEAD branch:[ \t]*(\S+)").expect("valid HEAD branch regex"))
}

fn benign_stash_pop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)No stash found|No stash entries found|Did not need to pop stash")
            .expect("valid stash pop regex")
    })
}

/// Extract the branch following `HEAD branch:` in `git remote show` output.
///
/// Returns `None` when the marker is absent or git reports `(unknown)`.
pub fn head_branch(remote_show: &str) -> Option<&str> {
    let name = head_branch_re().captures(remote_show)?.get(1)?.as_str();
    (name != UNKNOWN_HEAD).then_some(name)
}

/// Whether a failed `git stash pop` only means there was nothing to restore.
pub fn is_benign_stash_pop(output: &str) -> bool {
    benign_stash_pop_re().is_match(output)
}
