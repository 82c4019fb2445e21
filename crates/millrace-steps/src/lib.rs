//!
//! Standard library of pipeline utility steps for Millrace
//!
//! Each step is a small configuration struct that binds from
//! invocation arguments, plus an execution that does the work against
//! a [`StepContext`](millrace_core::StepContext). The registry built
//! by [`builtin_steps`] is the full catalog this crate ships.

use std::sync::Arc;

use millrace_core::StepRegistry;

pub mod file_or_text;
pub mod json;
pub mod messages;

use crate::json::{ReadJsonDescriptor, WriteJsonDescriptor};

/// Registry preloaded with every step this crate provides.
pub fn builtin_steps() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry.register(Arc::new(ReadJsonDescriptor));
    registry.register(Arc::new(WriteJsonDescriptor));
    registry
}
