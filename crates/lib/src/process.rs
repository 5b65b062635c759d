//! External process execution.
//!
//! [`CommandRunner`] is the seam between the pipeline and the operating
//! system. [`SystemRunner`] spawns real processes; tests substitute a
//! recording runner.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::workdir::ScopedDir;

#[derive(Debug, Error)]
pub enum CommandError {
  /// The process ran and exited unsuccessfully. `code` is `None` when it was
  /// terminated by a signal.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },

  #[error("failed to launch {cmd}")]
  Spawn {
    cmd: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to enter {path}")]
  WorkDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A program invocation scoped to a working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.into(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

pub trait CommandRunner {
  /// Run `cmd` to completion, succeeding only on a zero exit status.
  fn run(&mut self, cmd: &CommandSpec) -> Result<(), CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
  fn run(&mut self, cmd: &CommandSpec) -> Result<(), CommandError> {
    (**self).run(cmd)
  }
}

/// Runs commands as child processes with inherited stdio.
///
/// The child inherits the working directory from this process: the runner
/// enters `cmd.cwd` for the duration of the call and restores the previous
/// directory afterwards, whatever the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, cmd: &CommandSpec) -> Result<(), CommandError> {
    let _dir = ScopedDir::enter(&cmd.cwd).map_err(|source| CommandError::WorkDir {
      path: cmd.cwd.clone(),
      source,
    })?;

    debug!(cmd = %cmd, cwd = %cmd.cwd.display(), "spawning process");

    let status = Command::new(&cmd.program)
      .args(&cmd.args)
      .status()
      .map_err(|source| CommandError::Spawn {
        cmd: cmd.to_string(),
        source,
      })?;

    if !status.success() {
      return Err(CommandError::Failed {
        cmd: cmd.to_string(),
        code: status.code(),
      });
    }

    Ok(())
  }
}
