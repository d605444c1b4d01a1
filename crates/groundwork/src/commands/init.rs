use std::path::Path;

use anyhow::Result;
use chrono::Datelike as _;

use crate::config::AppContext;
use crate::texts;
use crate::texts::templates::Document;
use crate::utils::command::Runner;
use crate::utils::files::{self, DirOutcome, WriteOutcome};
use crate::utils::git::{self, VcsReport};
use crate::utils::log::t;
use crate::{log_info, log_success, log_warn};

/// Directories of the 3-layer layout, parents before children.
pub const FOLDERS: &[&str] = &[
  "directives",
  "execution",
  "src",
  ".tmp",
  ".tmp/logs",
  ".agent/skills",
];

/// What a completed run did.
#[derive(Debug)]
pub struct InitReport {
  pub repo_name: String,
  pub folders: Vec<(&'static str, DirOutcome)>,
  pub files: Vec<(&'static str, WriteOutcome)>,
  pub vcs: VcsReport,
}

/// Materialize the workspace under `ctx.root`, then try to set up version control.
///
/// Filesystem errors abort the run. Version control problems are logged and
/// reported in [`InitReport::vcs`] but never turn into an error.
///
/// Not guarded against concurrent runs; do not run twice at once in the same directory.
pub fn run(ctx: &AppContext, runner: &dyn Runner) -> Result<InitReport> {
  log_info!("{}", texts::init::start_banner());

  let root = ctx.root.as_path();
  let repo_name = ctx.repo_name()?;
  let year = chrono::Local::now().year();

  let folders = ensure_directories(root, FOLDERS)?;
  let docs = texts::templates::documents(&repo_name, year);
  let files = write_documents(root, &docs)?;

  let vcs = git::bootstrap_version_control(root, &repo_name, runner);
  let failed: Vec<&str> = vcs.failures().iter().map(|err| err.step()).collect();
  if !failed.is_empty() {
    log_warn!("{}", texts::init::version_control_incomplete(&failed));
  }

  log_info!("");
  log_success!("{}", texts::init::success_banner());
  log_info!("{}", texts::init::next_step_hint());

  Ok(InitReport {
    repo_name,
    folders,
    files,
    vcs,
  })
}

/// Create every folder (and missing ancestors) under `root`.
pub fn ensure_directories(
  root: &Path,
  folders: &[&'static str],
) -> Result<Vec<(&'static str, DirOutcome)>> {
  let mut out = Vec::with_capacity(folders.len());
  for folder in folders {
    let outcome = files::ensure_dir(&root.join(folder))?;
    match outcome {
      DirOutcome::Created => log_info!("  [OK] Created folder: {}", t::path(folder)),
      DirOutcome::Existing => log_info!("  [OK] Folder exists: {}", t::path(folder)),
    }
    out.push((*folder, outcome));
  }
  Ok(out)
}

/// Write one document relative to `root`. Its parent folder must already exist.
pub fn write_file(root: &Path, doc: &Document) -> Result<WriteOutcome> {
  let outcome = files::write_if_changed(&root.join(doc.path), &doc.content)?;
  let verb = match outcome {
    WriteOutcome::Created => "Created",
    WriteOutcome::Updated => "Updated",
    WriteOutcome::Unchanged => "Unchanged",
  };
  match doc.note {
    Some(note) => log_info!("  [OK] {verb} {} ({note})", t::path(doc.path)),
    None => log_info!("  [OK] {verb} {}", t::path(doc.path)),
  }
  Ok(outcome)
}

fn write_documents(root: &Path, docs: &[Document]) -> Result<Vec<(&'static str, WriteOutcome)>> {
  docs
    .iter()
    .map(|doc| write_file(root, doc).map(|outcome| (doc.path, outcome)))
    .collect()
}
