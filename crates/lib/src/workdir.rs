//! Scoped changes of the process working directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Guard that switches the process working directory and switches it back
/// when dropped.
///
/// Restoration happens on every exit path, including early returns through
/// `?` and panics that unwind.
#[must_use = "the original directory is restored as soon as the guard is dropped"]
pub struct ScopedDir {
  original: PathBuf,
}

impl ScopedDir {
  pub fn enter(dir: &Path) -> io::Result<Self> {
    let original = env::current_dir()?;
    env::set_current_dir(dir)?;
    Ok(Self { original })
  }
}

impl Drop for ScopedDir {
  fn drop(&mut self) {
    if let Err(err) = env::set_current_dir(&self.original) {
      warn!(path = %self.original.display(), error = %err, "failed to restore working directory");
    }
  }
}
