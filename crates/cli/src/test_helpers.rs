//! Test helpers for unit tests
//!
//! This module provides shared utilities for unit tests within the CLI crate.
//! For integration tests, see `tests/integration_test_helpers.rs`.

use std::fs;
use std::path::{Path, PathBuf};

/// Guard for changing the current working directory in tests.
/// Automatically restores the original directory when dropped.
///
/// Tests using it must be `#[serial]`, since the working directory is process-wide.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    /// Create a new DirGuard and change to the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created or entered, or if the
    /// current directory can't be determined.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
