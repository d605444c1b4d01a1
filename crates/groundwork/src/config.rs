use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::utils::command::DEFAULT_TIMEOUT;
use crate::utils::error_messages;

/// Overrides the per-command timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "GROUNDWORK_COMMAND_TIMEOUT_SECS";

/// Everything a run needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct AppContext {
  /// Canonical workspace root.
  pub root: PathBuf,
  pub command_timeout: Duration,
}

impl AppContext {
  pub fn new(root: PathBuf, command_timeout: Duration) -> Self {
    Self {
      root,
      command_timeout,
    }
  }

  /// Resolve the workspace root (`dir` or the current directory) and read
  /// settings from the environment.
  ///
  /// # Errors
  /// Returns an error if the directory does not exist or the timeout
  /// override is not a positive integer.
  pub fn resolve(dir: Option<&Path>) -> Result<Self> {
    let raw = match dir {
      Some(dir) => dir.to_path_buf(),
      None => std::env::current_dir().context("failed to read current directory")?,
    };
    let root = raw
      .canonicalize()
      .with_context(|| error_messages::target_dir_unusable(raw.display()))?;
    if !root.is_dir() {
      anyhow::bail!(error_messages::target_not_a_dir(root.display()));
    }
    Ok(Self::new(root, command_timeout_from_env()?))
  }

  /// Display name of the workspace, also used as the remote repository name.
  pub fn repo_name(&self) -> Result<String> {
    derive_repo_name(&self.root)
  }
}

/// Final path segment of `root`.
///
/// # Errors
/// Fails for paths without a final segment, such as `/`, and for names that
/// are not valid UTF-8.
pub fn derive_repo_name(root: &Path) -> Result<String> {
  let name = root
    .file_name()
    .filter(|name| !name.is_empty())
    .ok_or_else(|| anyhow::anyhow!(error_messages::no_repo_name(root.display())))?;
  let Some(name) = name.to_str() else {
    anyhow::bail!(error_messages::non_utf8_repo_name(root.display()));
  };
  Ok(name.to_string())
}

fn command_timeout_from_env() -> Result<Duration> {
  let Ok(raw) = std::env::var(TIMEOUT_ENV) else {
    return Ok(DEFAULT_TIMEOUT);
  };
  match raw.trim().parse::<u64>() {
    Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
    _ => anyhow::bail!(error_messages::invalid_timeout(TIMEOUT_ENV, &raw)),
  }
}
