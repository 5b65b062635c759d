//! Configure, build and run pipeline.
//!
//! This module provides the [`Orchestrator`], which turns [`RunFlags`] into a
//! strictly ordered sequence of external commands:
//! - Configure (only on a clean configure): reset the output directory and run the generator
//! - Build: run the native build inside the output directory
//! - Execute: run the application, or the test binary under the memory checker
//!
//! The first failing phase terminates the run. Nothing is retried and nothing
//! already done is rolled back.

pub mod commands;
pub mod types;

use std::io;

use tracing::{debug, info, info_span};

use crate::config::ProjectConfig;
use crate::process::CommandRunner;

pub use commands::{build_command, configure_command, execute_command};
pub use types::{Phase, PipelineError, PlannedStep, RunConfiguration, RunFlags, RunReport, StepError};

pub struct Orchestrator<'a, R> {
  project: &'a ProjectConfig,
  runner: R,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
  pub fn new(project: &'a ProjectConfig, runner: R) -> Self {
    Self { project, runner }
  }

  /// Derive the run configuration from the command-line flags.
  ///
  /// Only reads the filesystem: a missing output directory forces a clean
  /// configure.
  pub fn resolve_configuration(&self, flags: RunFlags) -> RunConfiguration {
    let exists = self.project.build_dir().is_dir();
    let config = RunConfiguration {
      perform_clean_configure: flags.clean || !exists,
      test_mode: flags.test,
    };
    debug!(?flags, output_dir_exists = exists, ?config, "resolved run configuration");
    config
  }

  /// The steps a run with `config` performs, in order.
  pub fn plan(&self, config: &RunConfiguration) -> Vec<PlannedStep> {
    let mut steps = Vec::with_capacity(3);
    if config.perform_clean_configure {
      steps.push(PlannedStep {
        phase: Phase::Configuring,
        resets_output_dir: true,
        command: configure_command(self.project, config.test_mode),
      });
    }
    steps.push(PlannedStep {
      phase: Phase::Building,
      resets_output_dir: false,
      command: build_command(self.project),
    });
    steps.push(PlannedStep {
      phase: Phase::Executing,
      resets_output_dir: false,
      command: execute_command(self.project, config.test_mode),
    });
    steps
  }

  /// Reset the output directory and run the generator in it.
  ///
  /// Does nothing unless `config.perform_clean_configure` is set.
  pub fn prepare_output_directory(&mut self, config: &RunConfiguration) -> Result<(), PipelineError> {
    if !config.perform_clean_configure {
      debug!("reusing existing output directory");
      return Ok(());
    }

    let _span = info_span!("configure").entered();
    self.reset_output_directory().map_err(PipelineError::Configure)?;

    let cmd = configure_command(self.project, config.test_mode);
    info!(cmd = %cmd, "configuring");
    self
      .runner
      .run(&cmd)
      .map_err(|err| PipelineError::Configure(err.into()))
  }

  pub fn build(&mut self, _config: &RunConfiguration) -> Result<(), PipelineError> {
    let _span = info_span!("build").entered();
    let cmd = build_command(self.project);
    info!(cmd = %cmd, "building");
    self.runner.run(&cmd).map_err(PipelineError::Build)
  }

  pub fn execute(&mut self, config: &RunConfiguration) -> Result<(), PipelineError> {
    let _span = info_span!("execute", test_mode = config.test_mode).entered();
    let cmd = execute_command(self.project, config.test_mode);
    info!(cmd = %cmd, "executing");
    self.runner.run(&cmd).map_err(PipelineError::Execution)
  }

  /// Resolve, then configure (when needed), build and execute.
  pub fn run(&mut self, flags: RunFlags) -> Result<RunReport, PipelineError> {
    let config = self.resolve_configuration(flags);
    let mut phases = Vec::with_capacity(3);

    if config.perform_clean_configure {
      self.prepare_output_directory(&config)?;
      phases.push(Phase::Configuring);
    }

    self.build(&config)?;
    phases.push(Phase::Building);

    self.execute(&config)?;
    phases.push(Phase::Executing);

    info!(phases = phases.len(), "run succeeded");
    Ok(RunReport {
      configuration: config,
      phases,
    })
  }

  /// Delete the output directory if present and create it empty.
  ///
  /// Only a missing directory is tolerated; any other removal failure is
  /// returned so that a stale tree is never silently reconfigured.
  fn reset_output_directory(&self) -> Result<(), StepError> {
    let path = self.project.build_dir();

    let removed = match std::fs::symlink_metadata(path) {
      Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
      Ok(_) => std::fs::remove_file(path),
      Err(err) => Err(err),
    };
    match removed {
      Ok(()) => info!(path = %path.display(), "removed output directory"),
      Err(err) if err.kind() == io::ErrorKind::NotFound => {}
      Err(source) => {
        return Err(StepError::RemoveOutputDir {
          path: path.to_path_buf(),
          source,
        });
      }
    }

    std::fs::create_dir_all(path).map_err(|source| StepError::CreateOutputDir {
      path: path.to_path_buf(),
      source,
    })
  }
}
