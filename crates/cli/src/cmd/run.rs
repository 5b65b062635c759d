//! Implementation of a full `cbuild` run.
//!
//! Configures the project when needed, builds it, then runs the application
//! or the test binary.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use cbuild_lib::config::ProjectConfig;
use cbuild_lib::pipeline::{Orchestrator, Phase, RunFlags, RunReport};
use cbuild_lib::process::SystemRunner;

use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

#[derive(Serialize)]
struct RunSummary<'a> {
  #[serde(flatten)]
  report: &'a RunReport,
  output_dir: &'a Path,
  duration_ms: u128,
}

#[derive(Serialize)]
struct FailureSummary<'a> {
  failed_phase: Phase,
  error: String,
  output_dir: &'a Path,
}

/// Execute the pipeline for the project at `project_dir`.
///
/// The error returned for a failed phase starts with that phase's message
/// (`Configure failed`, `Build failed` or `Test failed`).
pub fn cmd_run(project_dir: &Path, flags: RunFlags, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let project = ProjectConfig::load(project_dir).context("Failed to load project configuration")?;
  info!(root = %project.root().display(), "loaded project");

  let report = match Orchestrator::new(&project, SystemRunner).run(flags) {
    Ok(report) => report,
    Err(err) => {
      let failed_phase = err.phase();
      let err = anyhow::Error::new(err);
      if output.is_json() {
        print_json(&FailureSummary {
          failed_phase,
          error: format!("{:#}", err),
          output_dir: project.build_dir(),
        })?;
      }
      return Err(err);
    }
  };
  let elapsed = start.elapsed();

  if output.is_json() {
    print_json(&RunSummary {
      report: &report,
      output_dir: project.build_dir(),
      duration_ms: elapsed.as_millis(),
    })?;
  } else {
    println!();
    if report.configuration.test_mode {
      print_success("Tests passed!");
    } else {
      print_success("Run complete!");
    }
    print_stat("Output", &project.build_dir().display().to_string());
    print_stat("Configured", if report.configured() { "yes" } else { "no (reused)" });
    print_stat("Duration", &format_duration(elapsed));
  }

  Ok(())
}
