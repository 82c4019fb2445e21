use std::sync::Arc;

use async_trait::async_trait;
use millrace_core::{
    EnvProvider, PlainValue, Step, StepBase, StepContext, StepDescriptor, StepError, StepExecution,
    StepReturn,
};
use serde::{Deserialize, Serialize};

use crate::file_or_text::FileOrTextArgs;
use crate::messages;

/// Environment variable that switches the plain-graph default on for
/// the whole process.
pub const RETURN_POJO_ENV_VAR: &str = "PIPELINE_UTILITY_JSON_RETURN_POJOS";

/// Host property that switches the plain-graph default on for the
/// whole process.
pub const RETURN_POJO_PROPERTY: &str = "millrace.steps.json.ReadJsonStep.returnPojo";

/// Default for `returnPojo` when an invocation leaves it unset.
///
/// True when the host property or the environment variable carries a
/// true flag. The two channels are ORed, so an operator can flip the
/// default through either one.
pub fn return_pojo_default(env: &dyn EnvProvider) -> bool {
    env.property_flag(RETURN_POJO_PROPERTY) || env.env_flag(RETURN_POJO_ENV_VAR)
}

/// Read JSON step
///
/// Parses a JSON document from a workspace file or from literal text
/// and returns the parsed graph. With `returnPojo` the step returns a
/// plain std-collection graph instead of the library's value graph;
/// leaving it unset defers to [`return_pojo_default`] at run time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadJsonStep {
    /// Where the document comes from.
    #[serde(flatten)]
    pub input: FileOrTextArgs,
    return_pojo: Option<bool>,
}

impl ReadJsonStep {
    /// Name the step is invoked by.
    pub const FUNCTION_NAME: &'static str = "readJSON";

    /// Unconfigured step, every parameter at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step reading from a workspace file.
    pub fn from_file(file: impl Into<String>) -> Self {
        Self {
            input: FileOrTextArgs::from_file(file),
            return_pojo: None,
        }
    }

    /// Step reading literal text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: FileOrTextArgs::from_text(text),
            return_pojo: None,
        }
    }

    /// The configured switch; `None` means the invocation left it
    /// unset.
    pub fn return_pojo(&self) -> Option<bool> {
        self.return_pojo
    }

    /// Sets or clears the plain-graph switch.
    pub fn set_return_pojo(&mut self, return_pojo: Option<bool>) {
        self.return_pojo = return_pojo;
    }

    /// The switch this run applies: the explicit setting when present,
    /// otherwise the ambient default.
    pub fn effective_return_pojo(&self, env: &dyn EnvProvider) -> bool {
        self.return_pojo
            .unwrap_or_else(|| return_pojo_default(env))
    }
}

impl StepBase for ReadJsonStep {
    fn function_name(&self) -> &'static str {
        Self::FUNCTION_NAME
    }
}

impl Step for ReadJsonStep {
    fn start(&self, context: Arc<StepContext>) -> Result<Box<dyn StepExecution>, StepError> {
        Ok(Box::new(ReadJsonStepExecution {
            step: self.clone(),
            context,
        }))
    }
}

/// One run of [`ReadJsonStep`].
pub struct ReadJsonStepExecution {
    step: ReadJsonStep,
    context: Arc<StepContext>,
}

#[async_trait]
impl StepExecution for ReadJsonStepExecution {
    async fn run(&self) -> Result<StepReturn, StepError> {
        let text = self
            .step
            .input
            .resolve_text(ReadJsonStep::FUNCTION_NAME, &self.context)
            .await?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        let return_pojo = self.step.effective_return_pojo(self.context.env());
        tracing::debug!(
            step = ReadJsonStep::FUNCTION_NAME,
            return_pojo,
            "parsed JSON input"
        );

        if return_pojo {
            Ok(StepReturn::Plain(PlainValue::from(value)))
        } else {
            Ok(StepReturn::Json(value))
        }
    }
}

/// Registry descriptor for [`ReadJsonStep`].
#[derive(Debug, Default)]
pub struct ReadJsonDescriptor;

impl StepDescriptor for ReadJsonDescriptor {
    fn function_name(&self) -> &'static str {
        ReadJsonStep::FUNCTION_NAME
    }

    fn display_name(&self) -> String {
        messages::read_json_display_name()
    }

    fn bind(&self, args: serde_json::Value) -> Result<Box<dyn Step>, StepError> {
        let step: ReadJsonStep = serde_json::from_value(args).map_err(|e| {
            StepError::ConfigurationError(messages::invalid_arguments(
                ReadJsonStep::FUNCTION_NAME,
                e,
            ))
        })?;
        Ok(Box::new(step))
    }
}
