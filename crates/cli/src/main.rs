use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cbuild_lib::pipeline::RunFlags;

mod cmd;
mod output;

use output::{OutputFormat, print_error};

/// cbuild - configure, build and run a CMake project
#[derive(Parser)]
#[command(name = "cbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Wipe the output directory and reconfigure before building
  #[arg(short, long)]
  clean: bool,

  /// Build with testing enabled and run the tests under the memory checker
  #[arg(short, long)]
  test: bool,

  /// Project root containing the top-level CMakeLists.txt
  #[arg(short = 'C', long, env = "CBUILD_PROJECT_DIR", default_value = ".")]
  project_dir: PathBuf,

  /// Print the steps that would run without running them
  #[arg(long)]
  dry_run: bool,

  /// Output format for the summary
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let flags = RunFlags {
    clean: cli.clean,
    test: cli.test,
  };

  let result = if cli.dry_run {
    cmd::cmd_plan(&cli.project_dir, flags, cli.output)
  } else {
    cmd::cmd_run(&cli.project_dir, flags, cli.output)
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
