//!
//! Millrace Core - step framework for the Millrace utility steps
//!
//! This crate defines the step traits, the registry that binds
//! invocations to steps, and the context a step runs against. It is the
//! foundation the step crates build on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-run context handed to executions
pub mod context;

/// Environment variables and host properties
pub mod env;

/// Error types
pub mod error;

/// Step registry and descriptors
pub mod registry;

/// Step return values
pub mod types;

// Re-export key types
pub use context::StepContext;
pub use env::{parse_bool, property, set_property, EnvProvider, SystemEnv};
pub use error::StepError;
pub use registry::{StepDescriptor, StepRegistry};
pub use types::{PlainValue, StepReturn};

/// Non-async base trait for steps
/// This trait is object-safe and carries the identity every step has
pub trait StepBase: Send + Sync {
    /// Name the step is invoked by
    fn function_name(&self) -> &'static str;
}

/// A configured step, ready to be started against a context
///
/// `start` must return immediately; all work belongs in the returned
/// execution's [`StepExecution::run`].
pub trait Step: StepBase {
    /// Creates the execution for one run of this step
    fn start(&self, context: Arc<StepContext>) -> Result<Box<dyn StepExecution>, StepError>;
}

/// One run of a step
#[async_trait]
pub trait StepExecution: Send + Sync {
    /// Performs the step's work and produces its return value
    async fn run(&self) -> Result<StepReturn, StepError>;
}

/// Example step that echoes its message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoStep {
    /// Message template; a `{workspace}` placeholder expands to the run's workspace path
    pub message: String,
}

impl EchoStep {
    /// Create a new EchoStep
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl StepBase for EchoStep {
    fn function_name(&self) -> &'static str {
        "echo"
    }
}

impl Step for EchoStep {
    fn start(&self, context: Arc<StepContext>) -> Result<Box<dyn StepExecution>, StepError> {
        Ok(Box::new(EchoExecution {
            message: self.message.clone(),
            context,
        }))
    }
}

struct EchoExecution {
    message: String,
    context: Arc<StepContext>,
}

#[async_trait]
impl StepExecution for EchoExecution {
    async fn run(&self) -> Result<StepReturn, StepError> {
        let workspace = self.context.workspace().display().to_string();
        let message = self.message.replace("{workspace}", &workspace);
        tracing::debug!(step = "echo", %message, "echoing");
        Ok(StepReturn::Text(message))
    }
}
