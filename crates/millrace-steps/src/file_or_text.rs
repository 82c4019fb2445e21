//! Shared input selection for steps that read a document either from a
//! workspace file or from literal text.

use std::path::PathBuf;

use millrace_core::{StepContext, StepError};
use serde::{Deserialize, Serialize};

use crate::messages;

/// The `file`/`text` parameter pair shared by the read-style steps.
///
/// Exactly one of the two must be set. Blank values (empty or
/// whitespace-only) count as absent, so an invocation can pass an empty
/// string for one parameter without tripping the conflict check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrTextArgs {
    /// Path of the file to read, resolved against the workspace.
    pub file: Option<String>,
    /// Literal document text.
    pub text: Option<String>,
}

impl FileOrTextArgs {
    /// Arguments reading from a workspace file.
    pub fn from_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            text: None,
        }
    }

    /// Arguments reading literal text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            file: None,
            text: Some(text.into()),
        }
    }

    fn file_value(&self) -> Option<&str> {
        self.file.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn text_value(&self) -> Option<&str> {
        self.text.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Picks the configured source.
    ///
    /// Fails when both or neither parameter is set; `function_name`
    /// goes into the message so the user sees which step complained.
    pub fn source(&self, function_name: &str) -> Result<InputSource<'_>, StepError> {
        match (self.file_value(), self.text_value()) {
            (Some(_), Some(_)) => Err(StepError::ValidationError(
                messages::file_and_text_both_set(function_name),
            )),
            (Some(file), None) => Ok(InputSource::File(file)),
            (None, Some(text)) => Ok(InputSource::Text(text)),
            (None, None) => Err(StepError::ValidationError(messages::missing_file_or_text(
                function_name,
            ))),
        }
    }

    /// Loads the input document as text.
    ///
    /// Literal text comes back as-is; a file is read from the context's
    /// workspace.
    pub async fn resolve_text(
        &self,
        function_name: &str,
        context: &StepContext,
    ) -> Result<String, StepError> {
        match self.source(function_name)? {
            InputSource::Text(text) => Ok(text.to_string()),
            InputSource::File(file) => read_workspace_file(context.resolve_path(file)).await,
        }
    }
}

/// The input source chosen after validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource<'a> {
    /// Workspace file path, as configured.
    File(&'a str),
    /// Literal text, as configured.
    Text(&'a str),
}

async fn read_workspace_file(path: PathBuf) -> Result<String, StepError> {
    match tokio::fs::metadata(&path).await {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StepError::IOError(messages::file_not_found(&path)));
        }
        Err(e) => return Err(StepError::IOError(e.to_string())),
        Ok(meta) if meta.is_dir() => {
            return Err(StepError::ValidationError(messages::path_is_directory(
                &path,
            )));
        }
        Ok(_) => {}
    }
    Ok(tokio::fs::read_to_string(&path).await?)
}
