//! Scratch workspace directories for step tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use millrace_core::{EnvProvider, StepContext};
use tempfile::TempDir;

/// Temporary workspace a step can run against.
///
/// The backing directory is deleted when the value is dropped, so each
/// test gets an isolated filesystem root.
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Fresh empty workspace.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// The workspace root on disk.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file under the workspace, creating parent directories
    /// as needed. Returns the absolute path.
    pub fn write_file(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Creates a directory under the workspace. Returns the absolute
    /// path.
    pub fn create_dir(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Reads a file under the workspace to a string.
    pub fn read_file(&self, relative: &str) -> io::Result<String> {
        fs::read_to_string(self.dir.path().join(relative))
    }

    /// Context rooted at this workspace, reading the real process
    /// environment.
    pub fn context(&self) -> Arc<StepContext> {
        Arc::new(StepContext::new(self.dir.path()))
    }

    /// Context rooted at this workspace with a caller-supplied
    /// environment, usually a [`FakeEnv`](crate::FakeEnv).
    pub fn context_with_env(&self, env: impl EnvProvider + 'static) -> Arc<StepContext> {
        Arc::new(StepContext::with_env(self.dir.path(), env))
    }
}
