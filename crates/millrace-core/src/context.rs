use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::env::{EnvProvider, SystemEnv};

/// Per-run services handed to a step when it starts.
///
/// Carries the workspace directory relative paths resolve against and
/// the [`EnvProvider`] the run reads ambient configuration through.
/// Cloning is cheap; executions hold the context for their whole run.
#[derive(Clone)]
pub struct StepContext {
    workspace: PathBuf,
    env: Arc<dyn EnvProvider>,
}

impl StepContext {
    /// Context rooted at `workspace`, reading the real process
    /// environment and property store.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self::with_env(workspace, SystemEnv)
    }

    /// Context rooted at `workspace` with a caller-supplied environment.
    pub fn with_env(workspace: impl Into<PathBuf>, env: impl EnvProvider + 'static) -> Self {
        Self {
            workspace: workspace.into(),
            env: Arc::new(env),
        }
    }

    /// The workspace directory for this run.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// The environment this run reads ambient configuration through.
    pub fn env(&self) -> &dyn EnvProvider {
        self.env.as_ref()
    }

    /// Resolves a step-supplied path against the workspace.
    ///
    /// Absolute paths pass through unchanged, matching `Path::join`.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.workspace.join(path)
    }
}

impl fmt::Debug for StepContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepContext")
            .field("workspace", &self.workspace)
            .finish_non_exhaustive()
    }
}
