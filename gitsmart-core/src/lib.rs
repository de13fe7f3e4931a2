//! git-smart core library — domain types, configuration, errors.
//!
//! - [`types`] — branch and remote newtypes
//! - [`error`] — [`ConfigError`]
//! - [`config`] — load the optional `~/.gitsmart/config.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{BranchName, RemoteName};
