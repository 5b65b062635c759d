//! Implementation of `cbuild --dry-run`.

use std::path::Path;

use anyhow::{Context, Result};

use cbuild_lib::config::ProjectConfig;
use cbuild_lib::pipeline::{Orchestrator, RunFlags};
use cbuild_lib::process::SystemRunner;

use crate::output::{OutputFormat, print_detail, print_info, print_json, print_step};

/// Print what a run with `flags` would do. Nothing is created, deleted or
/// spawned.
pub fn cmd_plan(project_dir: &Path, flags: RunFlags, output: OutputFormat) -> Result<()> {
  let project = ProjectConfig::load(project_dir).context("Failed to load project configuration")?;

  let orchestrator = Orchestrator::new(&project, SystemRunner);
  let config = orchestrator.resolve_configuration(flags);
  let steps = orchestrator.plan(&config);

  if output.is_json() {
    return print_json(&steps);
  }

  print_info("Dry run - no changes made");
  for (index, step) in steps.iter().enumerate() {
    print_step(index + 1, &format!("{} ({})", step.command, step.phase));
    if step.resets_output_dir {
      print_detail(&format!("after recreating {}", project.build_dir().display()));
    }
  }

  Ok(())
}
