use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

pub mod commands;
pub mod config;
pub mod texts;
pub mod utils;

use crate::config::AppContext;
use crate::utils::command::SystemRunner;

/// Groundwork - bootstrap a project directory into an agent-ready workspace.
///
/// Creates the directives/execution/src layout, writes git configuration,
/// README, MIT license, agent instructions and a directive template, then
/// initializes git and, when the GitHub CLI is available, publishes the
/// project to a new public repository.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Directory to initialize. Defaults to the current directory.
  dir: Option<PathBuf>,
}

pub fn parse() -> Cli {
  Cli::parse()
}

pub fn run() -> Result<()> {
  let cli = parse();
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .try_init();

  let ctx = AppContext::resolve(cli.dir.as_deref())?;
  let runner = SystemRunner::new(ctx.command_timeout);
  commands::init::run(&ctx, &runner)?;
  Ok(())
}
