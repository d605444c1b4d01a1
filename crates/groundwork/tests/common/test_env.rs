use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;
use tempfile::{Builder, TempDir};

/// Name of the workspace directory inside each sandbox.
pub const PROJECT: &str = "demo-project";

/// A sandbox with an empty project directory and a private `bin/` that is
/// prepended to `PATH`, so tests can shadow `gh` and `git` with scripts.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
  root: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("groundwork-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    let root = temp.path().join(PROJECT);
    std::fs::create_dir_all(&root).expect("project dir");
    let _ = std::fs::create_dir_all(temp.path().join("bin"));
    Self { temp, root }
  }

  pub fn path(&self) -> &Path {
    &self.root
  }

  pub fn sandbox(&self) -> &Path {
    self.temp.path()
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  fn gh_log(&self) -> PathBuf {
    self.temp.path().join("gh-calls.log")
  }

  /// `groundwork` running inside the project directory.
  pub fn groundwork(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("groundwork")?;
    let path = match std::env::var("PATH") {
      Ok(existing) if !existing.is_empty() => format!("{}:{existing}", self.bin_dir().display()),
      _ => self.bin_dir().display().to_string(),
    };
    cmd
      .current_dir(self.path())
      .env("PATH", path)
      .env("GIT_AUTHOR_NAME", "test")
      .env("GIT_AUTHOR_EMAIL", "test@example.com")
      .env("GIT_COMMITTER_NAME", "test")
      .env("GIT_COMMITTER_EMAIL", "test@example.com")
      .env("GIT_CONFIG_NOSYSTEM", "1")
      .env("GIT_CONFIG_GLOBAL", "/dev/null")
      .env_remove("GROUNDWORK_COMMAND_TIMEOUT_SECS");
    Ok(cmd)
  }

  /// Install a fake `gh` that records its arguments and exits with `code`.
  pub fn fake_gh(&self, code: i32) -> Result<()> {
    let body = format!(
      "#!/bin/sh\necho \"$@\" >> '{}'\nexit {code}\n",
      self.gh_log().display()
    );
    self.write_executable_script(&self.bin_dir().join("gh"), &body)
  }

  /// Install a fake `git` that always fails like a permission problem would.
  pub fn failing_git(&self) -> Result<()> {
    let body = "#!/bin/sh\necho \"fatal: cannot mkdir .git: Permission denied\" >&2\nexit 128\n";
    self.write_executable_script(&self.bin_dir().join("git"), body)
  }

  /// Argument lines the fake `gh` received, in order.
  pub fn gh_calls(&self) -> Result<Vec<String>> {
    let log = self.gh_log();
    if !log.exists() {
      return Ok(Vec::new());
    }
    let body = std::fs::read_to_string(&log).with_context(|| format!("read {}", log.display()))?;
    Ok(body.lines().map(str::to_string).collect())
  }

  pub fn read(&self, relative: &str) -> Result<String> {
    let path = self.path().join(relative);
    std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
  }

  /// Every path below the project root except the `.git` store, sorted.
  pub fn tree(&self) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
      let Ok(entries) = std::fs::read_dir(dir) else {
        return;
      };
      for entry in entries.flatten() {
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(&path).display().to_string();
        if rel == ".git" {
          continue;
        }
        out.push(rel);
        if path.is_dir() {
          walk(root, &path, out);
        }
      }
    }
    let mut out = Vec::new();
    walk(self.path(), self.path(), &mut out);
    out.sort();
    out
  }

  pub fn write_executable_script(&self, path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|err| anyhow::anyhow!("create parent dir for script {}: {err}", path.display()))?;
    }
    std::fs::write(path, body)
      .map_err(|err| anyhow::anyhow!("write script body at {}: {err}", path.display()))?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt as _;
      let mut perms = std::fs::metadata(path)?.permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(path, perms)
        .map_err(|err| anyhow::anyhow!("set script executable at {}: {err}", path.display()))?;
    }
    Ok(())
  }
}

/// Returns a workspace-local temp root for tests under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // crates/groundwork -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|parent| parent.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}
