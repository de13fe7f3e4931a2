//! Optional user configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.gitsmart/
//!   config.yaml
//! ```
//!
//! Every field is optional; a missing file yields [`Config::default`].
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::RemoteName;

/// Settings read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote whose `HEAD branch` is treated as the default branch.
    pub remote: RemoteName,

    /// Program invoked as the version-control executable.
    pub git: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteName::default(),
            git: PathBuf::from("git"),
        }
    }
}

/// `<home>/.gitsmart/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".gitsmart").join("config.yaml")
}

/// Load configuration from `<home>/.gitsmart/config.yaml`.
///
/// Returns defaults when the file is absent and `ConfigError::Parse`
/// (with path + line context) when it is malformed. An empty file is
/// treated like a missing one.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
