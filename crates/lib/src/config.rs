//! Project configuration.
//!
//! A [`ProjectConfig`] is built once at startup from the project root and an
//! optional `cbuild.toml` next to the project's top-level `CMakeLists.txt`.
//! It is then passed by reference to the orchestrator; nothing in the crate
//! reads paths from process-wide state.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  CONFIG_FILENAME, DEFAULT_APP, DEFAULT_BUILD_DIR, DEFAULT_CHECKER, DEFAULT_GENERATOR, DEFAULT_TEST_BINARY,
  DEFAULT_TEST_OPTION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("project directory not found: {path}")]
  ProjectNotFound {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("build_dir must be a relative path inside the project, got {0:?}")]
  InvalidBuildDir(String),
}

/// Memory checker wrapping the test binary in test mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
  pub program: String,
  pub args: Vec<String>,
}

impl Default for CheckerConfig {
  fn default() -> Self {
    Self {
      program: DEFAULT_CHECKER.to_string(),
      args: vec!["--leak-check=full".to_string()],
    }
  }
}

/// Tool names and arguments, as read from `cbuild.toml`.
///
/// Programs are resolved after entering the output directory, so relative
/// paths like `./mylib_app` refer to build artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
  /// Output directory, relative to the project root.
  pub build_dir: String,
  pub generator: String,
  pub configure_args: Vec<String>,
  /// Appended to the configure arguments in test mode.
  pub test_option: String,
  pub build_args: Vec<String>,
  pub app: String,
  pub test_binary: String,
  pub test_args: Vec<String>,
  pub checker: CheckerConfig,
}

impl Default for ToolsConfig {
  fn default() -> Self {
    Self {
      build_dir: DEFAULT_BUILD_DIR.to_string(),
      generator: DEFAULT_GENERATOR.to_string(),
      configure_args: vec!["..".to_string()],
      test_option: DEFAULT_TEST_OPTION.to_string(),
      build_args: vec!["--build".to_string(), ".".to_string()],
      app: DEFAULT_APP.to_string(),
      test_binary: DEFAULT_TEST_BINARY.to_string(),
      test_args: vec!["--output-on-failure".to_string()],
      checker: CheckerConfig::default(),
    }
  }
}

impl ToolsConfig {
  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}

#[derive(Debug, Clone)]
pub struct ProjectConfig {
  root: PathBuf,
  build_dir: PathBuf,
  tools: ToolsConfig,
}

impl ProjectConfig {
  /// Load the configuration for the project rooted at `root`.
  ///
  /// A missing `cbuild.toml` is not an error; the defaults apply.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let root = dunce::canonicalize(root).map_err(|source| ConfigError::ProjectNotFound {
      path: root.to_path_buf(),
      source,
    })?;

    let config_path = root.join(CONFIG_FILENAME);
    let tools = match std::fs::read_to_string(&config_path) {
      Ok(content) => ToolsConfig::from_toml(&content).map_err(|source| ConfigError::Parse {
        path: config_path.clone(),
        source,
      })?,
      Err(err) if err.kind() == io::ErrorKind::NotFound => ToolsConfig::default(),
      Err(source) => {
        return Err(ConfigError::Read {
          path: config_path,
          source,
        });
      }
    };

    debug!(root = %root.display(), ?tools, "loaded project configuration");
    Self::new(root, tools)
  }

  /// Build a configuration from an already-resolved root.
  pub fn new(root: PathBuf, tools: ToolsConfig) -> Result<Self, ConfigError> {
    validate_build_dir(&tools.build_dir)?;
    let build_dir = root.join(&tools.build_dir);
    Ok(Self { root, build_dir, tools })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// The output directory holding every generated artifact.
  pub fn build_dir(&self) -> &Path {
    &self.build_dir
  }

  pub fn tools(&self) -> &ToolsConfig {
    &self.tools
  }
}

/// The output directory gets deleted recursively, so it must stay strictly
/// below the project root.
fn validate_build_dir(build_dir: &str) -> Result<(), ConfigError> {
  let path = Path::new(build_dir);
  let mut components = path.components().peekable();

  if components.peek().is_none() {
    return Err(ConfigError::InvalidBuildDir(build_dir.to_string()));
  }

  if components.all(|c| matches!(c, Component::Normal(_))) {
    Ok(())
  } else {
    Err(ConfigError::InvalidBuildDir(build_dir.to_string()))
  }
}
