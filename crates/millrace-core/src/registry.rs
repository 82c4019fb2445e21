use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StepError;
use crate::Step;

/// Metadata and binding for one step function.
///
/// A descriptor is the registry-facing half of a step: it owns the
/// function name the host dispatches on, the human-readable display
/// name surfaced in tooling, and the binding from loosely-typed
/// invocation arguments to a configured [`Step`].
pub trait StepDescriptor: Send + Sync {
    /// Name the step is invoked by, e.g. `readJSON`.
    fn function_name(&self) -> &'static str;

    /// Human-readable name shown in step listings.
    fn display_name(&self) -> String;

    /// Builds a configured step from invocation arguments.
    ///
    /// Arguments arrive as a JSON object mapping parameter names to
    /// values. Binding fails with [`StepError::ConfigurationError`]
    /// when the arguments do not fit the step's parameters.
    fn bind(&self, args: serde_json::Value) -> Result<Box<dyn Step>, StepError>;
}

/// Lookup table from function name to step descriptor.
#[derive(Default)]
pub struct StepRegistry {
    steps: HashMap<&'static str, Arc<dyn StepDescriptor>>,
}

impl StepRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its function name.
    ///
    /// A later registration under the same name replaces the earlier
    /// one.
    pub fn register(&mut self, descriptor: Arc<dyn StepDescriptor>) {
        let name = descriptor.function_name();
        if self.steps.insert(name, descriptor).is_some() {
            tracing::warn!(step = name, "replacing previously registered step");
        }
    }

    /// The descriptor for `function_name`, if registered.
    pub fn descriptor(&self, function_name: &str) -> Option<&Arc<dyn StepDescriptor>> {
        self.steps.get(function_name)
    }

    /// Whether a step is registered under `function_name`.
    pub fn contains(&self, function_name: &str) -> bool {
        self.steps.contains_key(function_name)
    }

    /// Registered function names in sorted order.
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.steps.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Binds an invocation to a configured step.
    pub fn create(
        &self,
        function_name: &str,
        args: serde_json::Value,
    ) -> Result<Box<dyn Step>, StepError> {
        let descriptor = self
            .steps
            .get(function_name)
            .ok_or_else(|| StepError::UnknownStep(function_name.to_string()))?;
        descriptor.bind(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StepBase, StepContext, StepExecution, StepReturn};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct PingStep {
        message: String,
    }

    impl Default for PingStep {
        fn default() -> Self {
            Self {
                message: "pong".to_string(),
            }
        }
    }

    impl StepBase for PingStep {
        fn function_name(&self) -> &'static str {
            "ping"
        }
    }

    impl Step for PingStep {
        fn start(&self, _context: Arc<StepContext>) -> Result<Box<dyn StepExecution>, StepError> {
            Ok(Box::new(PingExecution {
                message: self.message.clone(),
            }))
        }
    }

    struct PingExecution {
        message: String,
    }

    #[async_trait]
    impl StepExecution for PingExecution {
        async fn run(&self) -> Result<StepReturn, StepError> {
            Ok(StepReturn::Text(self.message.clone()))
        }
    }

    struct PingDescriptor;

    impl StepDescriptor for PingDescriptor {
        fn function_name(&self) -> &'static str {
            "ping"
        }

        fn display_name(&self) -> String {
            "Ping the runner".to_string()
        }

        fn bind(&self, args: serde_json::Value) -> Result<Box<dyn Step>, StepError> {
            let step: PingStep = serde_json::from_value(args)
                .map_err(|e| StepError::ConfigurationError(e.to_string()))?;
            Ok(Box::new(step))
        }
    }

    fn registry() -> StepRegistry {
        let mut registry = StepRegistry::new();
        registry.register(Arc::new(PingDescriptor));
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = registry();
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
        let descriptor = registry.descriptor("ping").unwrap();
        assert_eq!(descriptor.display_name(), "Ping the runner");
    }

    #[test]
    fn test_function_names_sorted() {
        struct OtherDescriptor;
        impl StepDescriptor for OtherDescriptor {
            fn function_name(&self) -> &'static str {
                "aardvark"
            }
            fn display_name(&self) -> String {
                "Aardvark".to_string()
            }
            fn bind(&self, _args: serde_json::Value) -> Result<Box<dyn Step>, StepError> {
                Err(StepError::ConfigurationError("unbindable".to_string()))
            }
        }

        let mut registry = registry();
        registry.register(Arc::new(OtherDescriptor));
        assert_eq!(registry.function_names(), vec!["aardvark", "ping"]);
    }

    #[test]
    fn test_create_unknown_step() {
        let registry = registry();
        let err = registry.create("missing", json!({})).err().unwrap();
        assert_eq!(err, StepError::UnknownStep("missing".to_string()));
    }

    #[test]
    fn test_create_rejects_bad_arguments() {
        let registry = registry();
        let err = registry.create("ping", json!({"bogus": 1})).err().unwrap();
        assert!(matches!(err, StepError::ConfigurationError(_)));
    }

    #[tokio::test]
    async fn test_create_binds_and_runs() {
        let registry = registry();
        let step = registry
            .create("ping", json!({"message": "hello"}))
            .unwrap();
        assert_eq!(step.function_name(), "ping");

        let context = Arc::new(StepContext::new("/tmp"));
        let execution = step.start(context).unwrap();
        let result = execution.run().await.unwrap();
        assert_eq!(result.as_text(), Some("hello"));
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let registry = registry();
        let step = registry.create("ping", json!({})).unwrap();
        let execution = step.start(Arc::new(StepContext::new("/tmp"))).unwrap();
        let result = execution.run().await.unwrap();
        assert_eq!(result.as_text(), Some("pong"));
    }

    #[test]
    fn test_reregistration_replaces() {
        struct LoudPingDescriptor;
        impl StepDescriptor for LoudPingDescriptor {
            fn function_name(&self) -> &'static str {
                "ping"
            }
            fn display_name(&self) -> String {
                "Ping, but louder".to_string()
            }
            fn bind(&self, args: serde_json::Value) -> Result<Box<dyn Step>, StepError> {
                PingDescriptor.bind(args)
            }
        }

        let mut registry = registry();
        registry.register(Arc::new(LoudPingDescriptor));
        assert_eq!(registry.function_names(), vec!["ping"]);
        let descriptor = registry.descriptor("ping").unwrap();
        assert_eq!(descriptor.display_name(), "Ping, but louder");
    }
}
