//! Best-effort local repository and GitHub bootstrap.
//!
//! Nothing in here is fatal: every failure is logged and returned inside a
//! [`VcsReport`] so the caller decides what to make of it.

use std::path::Path;

use thiserror::Error;

use crate::utils::command::{CommandFailure, CommandOutput, Invocation, Runner};
use crate::utils::log::{emit_command, t};
use crate::{log_error, log_info, log_success, log_warn};

pub const REMOTE_NAME: &str = "origin";
pub const PUSH_BRANCH: &str = "main";
pub const INITIAL_COMMIT_MESSAGE: &str =
  "chore: initial project structure with 3-Layer Architecture";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalRepo {
  /// A `.git` entry was already present.
  Existing,
  Initialized,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
  #[error("git init failed: {0}")]
  InitFailed(CommandFailure),
  #[error("GitHub CLI (gh) unavailable: {0}")]
  ToolAbsent(CommandFailure),
  #[error("gh repo create failed: {0}")]
  CreateFailed(CommandFailure),
  #[error("git add failed: {0}")]
  StageFailed(CommandFailure),
  #[error("git commit failed: {0}")]
  CommitFailed(CommandFailure),
  #[error("git push failed: {0}")]
  PushFailed(CommandFailure),
}

impl VcsError {
  pub fn failure(&self) -> &CommandFailure {
    match self {
      Self::InitFailed(f)
      | Self::ToolAbsent(f)
      | Self::CreateFailed(f)
      | Self::StageFailed(f)
      | Self::CommitFailed(f)
      | Self::PushFailed(f) => f,
    }
  }

  /// Short name of the step that failed.
  pub fn step(&self) -> &'static str {
    match self {
      Self::InitFailed(_) => "init",
      Self::ToolAbsent(_) => "detect",
      Self::CreateFailed(_) => "create",
      Self::StageFailed(_) => "stage",
      Self::CommitFailed(_) => "commit",
      Self::PushFailed(_) => "push",
    }
  }
}

/// Outcome of [`bootstrap_version_control`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsReport {
  pub local: Result<LocalRepo, VcsError>,
  /// `Err(ToolAbsent)` means the remote part was skipped, not that it failed.
  pub remote: Result<(), VcsError>,
}

impl VcsReport {
  /// Failures worth surfacing to the user. A missing `gh` is not one of them.
  pub fn failures(&self) -> Vec<&VcsError> {
    let mut out = Vec::new();
    if let Err(err) = &self.local {
      out.push(err);
    }
    if let Err(err) = &self.remote
      && !matches!(err, VcsError::ToolAbsent(_))
    {
      out.push(err);
    }
    out
  }
}

/// Initialize the local repository if needed, then create, commit, and push
/// to a public GitHub repository when `gh` is available.
///
/// Stops at the first failing remote step; earlier steps are never undone.
pub fn bootstrap_version_control(base: &Path, repo_name: &str, runner: &dyn Runner) -> VcsReport {
  let local = ensure_local_repo(base, runner);
  if let Err(err) = &local {
    log_warn!("  [!] {}", err);
  }

  let remote = match detect_hosting_cli(base, runner) {
    Err(err) => {
      log_info!("  [!] GitHub CLI (gh) not found. Skipping remote repo creation.");
      log::debug!("{err}");
      Err(err)
    }
    Ok(()) => {
      log_info!(
        "  [..] Attempting to create GitHub repository: {}",
        t::name(repo_name)
      );
      let published = publish(base, repo_name, runner);
      match &published {
        Ok(()) => log_success!("  [OK] Successfully linked and pushed to GitHub: {repo_name}"),
        Err(err) => log_error!("  [!] GitHub/Git Error: {}", err),
      }
      published
    }
  };

  VcsReport { local, remote }
}

fn ensure_local_repo(base: &Path, runner: &dyn Runner) -> Result<LocalRepo, VcsError> {
  if base.join(".git").exists() {
    return Ok(LocalRepo::Existing);
  }
  invoke(runner, base, &Invocation::new("git", &["init"])).map_err(VcsError::InitFailed)?;
  log_info!("  [OK] Initialized local Git repository.");
  Ok(LocalRepo::Initialized)
}

fn detect_hosting_cli(base: &Path, runner: &dyn Runner) -> Result<(), VcsError> {
  invoke(runner, base, &Invocation::new("gh", &["--version"])).map_err(VcsError::ToolAbsent)?;
  Ok(())
}

fn publish(base: &Path, repo_name: &str, runner: &dyn Runner) -> Result<(), VcsError> {
  let remote_arg = format!("--remote={REMOTE_NAME}");
  let create = Invocation::new(
    "gh",
    &["repo", "create", repo_name, "--public", "--source=.", remote_arg.as_str()],
  );
  invoke(runner, base, &create).map_err(VcsError::CreateFailed)?;

  invoke(runner, base, &Invocation::new("git", &["add", "."])).map_err(VcsError::StageFailed)?;

  let commit = Invocation::new("git", &["commit", "-m", INITIAL_COMMIT_MESSAGE]);
  invoke(runner, base, &commit).map_err(VcsError::CommitFailed)?;

  let push = Invocation::new("git", &["push", "-u", REMOTE_NAME, PUSH_BRANCH]);
  invoke(runner, base, &push).map_err(VcsError::PushFailed)?;
  Ok(())
}

fn invoke(
  runner: &dyn Runner,
  cwd: &Path,
  invocation: &Invocation,
) -> Result<CommandOutput, CommandFailure> {
  emit_command(invocation.to_string());
  let result = runner.checked(invocation, cwd);
  match &result {
    Ok(out) => log::debug!(
      "{invocation}: exit={:?} stdout={:?} stderr={:?}",
      out.code,
      out.stdout,
      out.stderr
    ),
    Err(err) => log::debug!("{err:?}"),
  }
  result
}
