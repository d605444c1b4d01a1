//! Common error messages used across the codebase.
//! Centralizes error message strings to ensure consistency and simplify maintenance.

use std::fmt::Display;

pub(crate) fn target_dir_unusable(path: impl Display) -> String {
  format!("failed to resolve target directory {path}")
}

pub(crate) fn target_not_a_dir(path: impl Display) -> String {
  format!("target {path} is not a directory")
}

pub(crate) fn no_repo_name(path: impl Display) -> String {
  format!("cannot derive a repository name from {path}")
}

pub(crate) fn non_utf8_repo_name(path: impl Display) -> String {
  format!("directory name of {path} is not valid UTF-8, cannot use it as a repository name")
}

pub(crate) fn invalid_timeout(var: &str, value: &str) -> String {
  format!("{var} must be a positive number of seconds, got {value:?}")
}
