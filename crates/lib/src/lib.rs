//! cbuild-lib: configure, build and run a CMake project
//!
//! This crate provides the pieces behind the `cbuild` binary:
//! - `ProjectConfig`: project root, output directory and tool settings
//! - `Orchestrator`: the configure → build → execute pipeline
//! - `CommandRunner`: the process-spawning seam, with `SystemRunner` as the real implementation
//! - `ScopedDir`: working-directory guard restored on drop

pub mod config;
pub mod consts;
pub mod pipeline;
pub mod process;
#[cfg(test)]
mod util;
pub mod workdir;
