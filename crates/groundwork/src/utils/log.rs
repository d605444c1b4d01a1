/// Token styling helpers.
///
/// The `t` module stands for "tokens". Use these helpers to style
/// specific values inside info messages consistently across the CLI.
pub mod t {
  use std::fmt::Display;

  use owo_colors::OwoColorize as _;

  pub fn path(p: impl Display) -> String {
    format!("{}", p.to_string().cyan())
  }

  pub fn name(value: impl Display) -> String {
    format!("{}", value.to_string().magenta())
  }

  pub fn cmd(value: impl Display) -> String {
    format!("{}", value.to_string().dimmed())
  }

  pub fn ok(s: impl Display) -> String {
    format!("{}", s.to_string().green())
  }

  pub fn warn(s: impl Display) -> String {
    format!("{}", s.to_string().yellow())
  }

  pub fn err(s: impl Display) -> String {
    format!("{}", s.to_string().red())
  }
}

// Routed logging: when a sink is set, macros emit events to it; otherwise print.
// info = neutral, success/warn/error = full-line tint.

use crossbeam_channel::Sender;
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Success,
  Warn,
  Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
  /// An external command about to run, e.g. "git init"
  Command(String),
  /// A single log line preserving ANSI styling
  Line { level: LogLevel, ansi: String },
}

static SINK: Mutex<Option<Sender<LogEvent>>> = Mutex::new(None);

pub fn set_log_sink(sender: Sender<LogEvent>) {
  *SINK.lock() = Some(sender);
}

pub fn clear_log_sink() {
  *SINK.lock() = None;
}

pub(crate) fn emit(level: LogLevel, text: String) {
  if let Some(tx) = SINK.lock().clone() {
    let _ = tx.send(LogEvent::Line { level, ansi: text });
  } else {
    match level {
      LogLevel::Info | LogLevel::Success | LogLevel::Warn => anstream::println!("{}", text),
      LogLevel::Error => anstream::eprintln!("{}", text),
    }
  }
}

/// Announce an external command before it runs.
pub(crate) fn emit_command(command: String) {
  if let Some(tx) = SINK.lock().clone() {
    let _ = tx.send(LogEvent::Command(command));
  } else {
    anstream::println!("{}", t::cmd(format!("       > {command}")));
  }
}

#[macro_export]
macro_rules! log_info {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Info,
      format!($fmt $(, $args )*)
    );
  }};
}

#[macro_export]
macro_rules! log_success {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Success,
      $crate::utils::log::t::ok(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_warn {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Warn,
      $crate::utils::log::t::warn(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_error {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Error,
      $crate::utils::log::t::err(format!($fmt $(, $args )*))
    );
  }};
}

/// Collects everything routed to the sink while `f` runs.
#[cfg(test)]
pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<LogEvent>) {
  let (tx, rx) = crossbeam_channel::unbounded();
  set_log_sink(tx);
  let out = f();
  clear_log_sink();
  let events = std::iter::from_fn(|| rx.try_recv().ok()).collect();
  (out, events)
}

/// Plain text of all `Line` events, ANSI escapes included.
#[cfg(test)]
pub(crate) fn lines(events: &[LogEvent]) -> Vec<String> {
  events
    .iter()
    .filter_map(|ev| match ev {
      LogEvent::Line { ansi, .. } => Some(ansi.clone()),
      LogEvent::Command(_) => None,
    })
    .collect()
}
