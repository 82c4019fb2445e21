//! In-memory environment fake.

use std::collections::HashMap;

use millrace_core::EnvProvider;

/// [`EnvProvider`] that serves variables and properties from in-memory
/// maps, so tests control ambient configuration without mutating the
/// process.
#[derive(Clone, Debug, Default)]
pub struct FakeEnv {
    vars: HashMap<String, String>,
    properties: HashMap<String, String>,
}

impl FakeEnv {
    /// Empty environment: every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Adds a host property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl EnvProvider for FakeEnv {
    fn env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}
