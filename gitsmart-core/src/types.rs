//! Domain newtypes shared by the sync engine and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A git branch name, either the branch the user started on or the
/// remote's default branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BranchName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Name of the remote consulted for the default branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteName(pub String);

impl RemoteName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RemoteName {
    fn default() -> Self {
        Self("origin".to_owned())
    }
}

impl fmt::Display for RemoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RemoteName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RemoteName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_defaults_to_origin() {
        assert_eq!(RemoteName::default().as_str(), "origin");
    }

    #[test]
    fn newtypes_read_as_plain_yaml_strings() {
        let branch: BranchName = serde_yaml::from_str("feature/x").expect("branch");
        let remote: RemoteName = serde_yaml::from_str("upstream").expect("remote");
        assert_eq!(branch, BranchName::from("feature/x"));
        assert_eq!(remote, RemoteName::from("upstream"));
        assert_eq!(
            serde_yaml::to_string(&branch).expect("serialize").trim(),
            "feature/x"
        );
    }

    #[test]
    fn branch_display_is_bare_name() {
        assert_eq!(BranchName::from("feature/x").to_string(), "feature/x");
    }
}
