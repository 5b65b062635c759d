//! Command lines for each phase.

use crate::config::ProjectConfig;
use crate::process::CommandSpec;

/// Generator invocation that writes build files into the output directory.
pub fn configure_command(project: &ProjectConfig, test_mode: bool) -> CommandSpec {
  let tools = project.tools();
  let cmd = CommandSpec::new(&tools.generator, project.build_dir()).args(&tools.configure_args);
  if test_mode { cmd.arg(&tools.test_option) } else { cmd }
}

pub fn build_command(project: &ProjectConfig) -> CommandSpec {
  let tools = project.tools();
  CommandSpec::new(&tools.generator, project.build_dir()).args(&tools.build_args)
}

/// The application binary, or the test binary wrapped in the memory checker.
pub fn execute_command(project: &ProjectConfig, test_mode: bool) -> CommandSpec {
  let tools = project.tools();
  if test_mode {
    CommandSpec::new(&tools.checker.program, project.build_dir())
      .args(&tools.checker.args)
      .arg(&tools.test_binary)
      .args(&tools.test_args)
  } else {
    CommandSpec::new(&tools.app, project.build_dir())
  }
}
