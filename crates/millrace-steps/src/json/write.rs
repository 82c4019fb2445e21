use std::sync::Arc;

use async_trait::async_trait;
use millrace_core::{
    Step, StepBase, StepContext, StepDescriptor, StepError, StepExecution, StepReturn,
};
use serde::{Deserialize, Serialize};

use crate::messages;

/// Write JSON step
///
/// Renders a JSON document and either writes it to a workspace file or
/// hands the rendered text back to the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteJsonStep {
    /// Document to write. Mandatory; a JSON `null` counts as missing.
    pub json: Option<serde_json::Value>,
    /// Workspace path to write to.
    pub file: Option<String>,
    /// Spaces of indentation per level; `0` renders compact output.
    pub pretty: u32,
    /// Return the rendered document as text instead of writing a file.
    pub return_text: bool,
}

impl WriteJsonStep {
    /// Name the step is invoked by.
    pub const FUNCTION_NAME: &'static str = "writeJSON";

    /// Step writing `json` to a workspace file.
    pub fn to_file(json: serde_json::Value, file: impl Into<String>) -> Self {
        Self {
            json: Some(json),
            file: Some(file.into()),
            ..Self::default()
        }
    }

    /// Step returning the rendered document as text.
    pub fn to_text(json: serde_json::Value) -> Self {
        Self {
            json: Some(json),
            return_text: true,
            ..Self::default()
        }
    }

    fn file_value(&self) -> Option<&str> {
        self.file.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Picks the configured target: exactly one of `file` and
    /// `returnText` must be set.
    fn target(&self) -> Result<WriteTarget<'_>, StepError> {
        match (self.file_value(), self.return_text) {
            (Some(_), true) => Err(StepError::ValidationError(messages::write_both_targets(
                Self::FUNCTION_NAME,
            ))),
            (Some(file), false) => Ok(WriteTarget::File(file)),
            (None, true) => Ok(WriteTarget::Text),
            (None, false) => Err(StepError::ValidationError(messages::write_missing_target(
                Self::FUNCTION_NAME,
            ))),
        }
    }

    /// Renders the document, compact or indented per `pretty`.
    fn render(&self, json: &serde_json::Value) -> Result<String, StepError> {
        if self.pretty == 0 {
            return Ok(serde_json::to_string(json)?);
        }
        let indent = " ".repeat(self.pretty as usize);
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        json.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| StepError::SerializationError(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteTarget<'a> {
    File(&'a str),
    Text,
}

impl StepBase for WriteJsonStep {
    fn function_name(&self) -> &'static str {
        Self::FUNCTION_NAME
    }
}

impl Step for WriteJsonStep {
    fn start(&self, context: Arc<StepContext>) -> Result<Box<dyn StepExecution>, StepError> {
        Ok(Box::new(WriteJsonStepExecution {
            step: self.clone(),
            context,
        }))
    }
}

/// One run of [`WriteJsonStep`].
pub struct WriteJsonStepExecution {
    step: WriteJsonStep,
    context: Arc<StepContext>,
}

#[async_trait]
impl StepExecution for WriteJsonStepExecution {
    async fn run(&self) -> Result<StepReturn, StepError> {
        let json = self.step.json.as_ref().ok_or_else(|| {
            StepError::ValidationError(messages::missing_json(WriteJsonStep::FUNCTION_NAME))
        })?;
        let target = self.step.target()?;
        let rendered = self.step.render(json)?;

        match target {
            WriteTarget::Text => {
                tracing::debug!(
                    step = WriteJsonStep::FUNCTION_NAME,
                    bytes = rendered.len(),
                    "returning rendered JSON"
                );
                Ok(StepReturn::Text(rendered))
            }
            WriteTarget::File(file) => {
                let path = self.context.resolve_path(file);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, rendered.as_bytes()).await?;
                tracing::debug!(
                    step = WriteJsonStep::FUNCTION_NAME,
                    path = %path.display(),
                    bytes = rendered.len(),
                    "wrote JSON file"
                );
                Ok(StepReturn::None)
            }
        }
    }
}

/// Registry descriptor for [`WriteJsonStep`].
#[derive(Debug, Default)]
pub struct WriteJsonDescriptor;

impl StepDescriptor for WriteJsonDescriptor {
    fn function_name(&self) -> &'static str {
        WriteJsonStep::FUNCTION_NAME
    }

    fn display_name(&self) -> String {
        messages::write_json_display_name()
    }

    fn bind(&self, args: serde_json::Value) -> Result<Box<dyn Step>, StepError> {
        let step: WriteJsonStep = serde_json::from_value(args).map_err(|e| {
            StepError::ConfigurationError(messages::invalid_arguments(
                WriteJsonStep::FUNCTION_NAME,
                e,
            ))
        })?;
        Ok(Box::new(step))
    }
}
