use anyhow::{Context, Result};
use gix as git;

use crate::common::test_env::TestEnv;

impl TestEnv {
  pub fn has_repo(&self) -> bool {
    git::open(self.path()).is_ok()
  }

  /// Message of the commit `HEAD` points at, or `None` while `HEAD` is unborn.
  pub fn head_message(&self) -> Result<Option<String>> {
    let repo = git::open(self.path()).context("open repository")?;
    match repo.head_commit() {
      Ok(commit) => Ok(Some(commit.message_raw_sloppy().to_string())),
      Err(_) => Ok(None),
    }
  }

  /// Whether a real `git` is installed; publish tests need it.
  pub fn git_available(&self) -> bool {
    std::process::Command::new("git")
      .arg("--version")
      .output()
      .is_ok_and(|out| out.status.success())
  }
}
