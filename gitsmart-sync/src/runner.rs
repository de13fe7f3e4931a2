//! Command runner: one git invocation in, one normalized result out.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use gitsmart_core::Config;

use crate::error::CommandError;

/// Executes git with an argument list.
///
/// Success yields the trimmed combined output; a non-zero exit yields
/// [`CommandError::Failed`] carrying the same text.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String, CommandError>;
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(args)
    }
}

/// [`GitRunner`] backed by a real subprocess.
#[derive(Debug, Clone)]
pub struct ProcessGit {
    program: PathBuf,
    cwd: Option<PathBuf>,
}

impl Default for ProcessGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ProcessGit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cwd: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.git)
    }

    /// Run every command in `dir` instead of the process working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl GitRunner for ProcessGit {
    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        tracing::debug!("{} {}", self.program.display(), args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.output().map_err(|source| CommandError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let combined = combine_output(&output.stdout, &output.stderr);
        if output.status.success() {
            Ok(combined)
        } else {
            tracing::debug!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                combined
            );
            Err(CommandError::failed(args, combined))
        }
    }
}

/// Merge stdout and stderr into one trimmed text, stdout first.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    text.trim().to_owned()
}
