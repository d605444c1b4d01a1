use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use wait_timeout::ChildExt as _;

/// Default upper bound for a single external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A program plus its argv, without any shell in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new(program: &str, args: &[&str]) -> Self {
    Self {
      program: program.to_string(),
      args: args.iter().map(|a| (*a).to_string()).collect(),
    }
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Captured result of a command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  pub invocation: Invocation,
  /// Exit code; `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Why an external command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
  /// The program could not be started (usually: not installed).
  Spawn { invocation: Invocation, message: String },
  TimedOut { invocation: Invocation, timeout: Duration },
  /// The program ran and exited unsuccessfully.
  Exit(CommandOutput),
}

impl CommandFailure {
  pub fn invocation(&self) -> &Invocation {
    match self {
      Self::Spawn { invocation, .. } | Self::TimedOut { invocation, .. } => invocation,
      Self::Exit(output) => &output.invocation,
    }
  }

  /// Best available diagnostic text: stderr, then stdout, then the exit status.
  pub fn diagnostic(&self) -> String {
    match self {
      Self::Spawn { message, .. } => format!("failed to start: {message}"),
      Self::TimedOut { timeout, .. } => format!("timed out after {}s", timeout.as_secs()),
      Self::Exit(output) => {
        let stderr = output.stderr.trim();
        let stdout = output.stdout.trim();
        if !stderr.is_empty() {
          stderr.to_string()
        } else if !stdout.is_empty() {
          stdout.to_string()
        } else {
          match output.code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
          }
        }
      }
    }
  }
}

impl fmt::Display for CommandFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "`{}`: {}", self.invocation(), self.diagnostic())
  }
}

/// Seam for running external programs.
pub trait Runner {
  /// Run to completion and capture output. Only start failures and
  /// timeouts are errors; a non-zero exit is reported in the output.
  fn output(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, CommandFailure>;

  /// Like [`Runner::output`], but a non-zero exit is an error too.
  fn checked(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, CommandFailure> {
    let output = self.output(invocation, cwd)?;
    if output.success() {
      Ok(output)
    } else {
      Err(CommandFailure::Exit(output))
    }
  }
}

/// Runs real processes with captured stdio and a per-call timeout.
#[derive(Debug, Clone)]
pub struct SystemRunner {
  timeout: Duration,
}

impl SystemRunner {
  pub fn new(timeout: Duration) -> Self {
    Self { timeout }
  }
}

impl Default for SystemRunner {
  fn default() -> Self {
    Self::new(DEFAULT_TIMEOUT)
  }
}

impl Runner for SystemRunner {
  fn output(&self, invocation: &Invocation, cwd: &Path) -> Result<CommandOutput, CommandFailure> {
    let deadline = Instant::now() + self.timeout;
    let mut child = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(cwd)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|err| CommandFailure::Spawn {
        invocation: invocation.clone(),
        message: err.to_string(),
      })?;

    // Drain both pipes while waiting so a full pipe buffer cannot block the child.
    let (tx, rx) = crossbeam_channel::unbounded();
    if let Some(out) = child.stdout.take() {
      drain(out, Stream::Stdout, tx.clone());
    }
    if let Some(err) = child.stderr.take() {
      drain(err, Stream::Stderr, tx.clone());
    }
    drop(tx);

    let status = match child.wait_timeout(self.timeout) {
      Ok(Some(status)) => status,
      Ok(None) => {
        let _ = child.kill();
        let _ = child.wait();
        return Err(CommandFailure::TimedOut {
          invocation: invocation.clone(),
          timeout: self.timeout,
        });
      }
      Err(err) => {
        let _ = child.kill();
        let _ = child.wait();
        return Err(CommandFailure::Spawn {
          invocation: invocation.clone(),
          message: format!("failed to wait: {err}"),
        });
      }
    };

    let (stdout, stderr) = collect(&rx, deadline, invocation);
    Ok(CommandOutput {
      invocation: invocation.clone(),
      code: status.code(),
      stdout,
      stderr,
    })
  }
}

#[derive(Clone, Copy, Debug)]
enum Stream {
  Stdout,
  Stderr,
}

/// Forward chunks read from `pipe` until it closes. The thread is never
/// joined: a grandchild holding the pipe open must not block the caller.
fn drain<R>(mut pipe: R, stream: Stream, tx: Sender<(Stream, Vec<u8>)>)
where
  R: Read + Send + 'static,
{
  thread::spawn(move || {
    let mut buf = [0u8; 8192];
    loop {
      match pipe.read(&mut buf) {
        Ok(0) | Err(_) => break,
        Ok(n) => {
          if tx.send((stream, buf[..n].to_vec())).is_err() {
            break;
          }
        }
      }
    }
  });
}

/// Gather output until both pipes close or `deadline` passes, whichever comes first.
fn collect(
  rx: &Receiver<(Stream, Vec<u8>)>,
  deadline: Instant,
  invocation: &Invocation,
) -> (String, String) {
  let mut stdout = Vec::new();
  let mut stderr = Vec::new();
  loop {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
      Ok((Stream::Stdout, chunk)) => stdout.extend_from_slice(&chunk),
      Ok((Stream::Stderr, chunk)) => stderr.extend_from_slice(&chunk),
      Err(RecvTimeoutError::Disconnected) => break,
      Err(RecvTimeoutError::Timeout) => {
        log::debug!("{invocation}: output still open at deadline, keeping partial output");
        break;
      }
    }
  }
  (
    String::from_utf8_lossy(&stdout).into_owned(),
    String::from_utf8_lossy(&stderr).into_owned(),
  )
}
