use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirOutcome {
  Created,
  Existing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
  Created,
  Updated,
  Unchanged,
}

/// Create `path` and all missing ancestors. Existing directories (and their
/// contents) are left untouched.
pub fn ensure_dir(path: &Path) -> Result<DirOutcome> {
  if path.is_dir() {
    return Ok(DirOutcome::Existing);
  }
  fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))?;
  Ok(DirOutcome::Created)
}

/// Write `content` to `path` unless the file already holds exactly that content.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
  let outcome = match fs::read(path) {
    Ok(existing) if existing == content.as_bytes() => return Ok(WriteOutcome::Unchanged),
    Ok(_) => WriteOutcome::Updated,
    Err(err) if err.kind() == ErrorKind::NotFound => WriteOutcome::Created,
    // Unreadable but maybe writable; let the write decide.
    Err(_) => WriteOutcome::Updated,
  };
  fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
  Ok(outcome)
}
