//! Types for pipeline runs.
//!
//! This module defines the run inputs, the phase enumeration, the report of a
//! completed run, and the error taxonomy for failed runs.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::process::{CommandError, CommandSpec};

/// Flags exactly as given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
  pub clean: bool,
  pub test: bool,
}

/// What a single run will do, derived once from [`RunFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunConfiguration {
  /// Wipe and reconfigure the output directory before building. Always true
  /// when the output directory does not exist yet.
  pub perform_clean_configure: bool,
  pub test_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Configuring,
  Building,
  Executing,
}

impl Phase {
  pub fn as_str(self) -> &'static str {
    match self {
      Phase::Configuring => "configure",
      Phase::Building => "build",
      Phase::Executing => "execute",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One step of a run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
  pub phase: Phase,
  /// Set on the configure step: the output directory is deleted and
  /// recreated before the command runs.
  pub resets_output_dir: bool,
  pub command: CommandSpec,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
  pub configuration: RunConfiguration,
  /// Phases that ran, in order.
  pub phases: Vec<Phase>,
}

impl RunReport {
  pub fn configured(&self) -> bool {
    self.phases.contains(&Phase::Configuring)
  }
}

/// Why the configure phase failed.
#[derive(Debug, Error)]
pub enum StepError {
  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("failed to remove output directory {path}")]
  RemoveOutputDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create output directory {path}")]
  CreateOutputDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A terminated run. Each variant names the phase that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Configure failed")]
  Configure(#[source] StepError),

  #[error("Build failed")]
  Build(#[source] CommandError),

  #[error("Test failed")]
  Execution(#[source] CommandError),
}

impl PipelineError {
  pub fn phase(&self) -> Phase {
    match self {
      PipelineError::Configure(_) => Phase::Configuring,
      PipelineError::Build(_) => Phase::Building,
      PipelineError::Execution(_) => Phase::Executing,
    }
  }
}
