//! Ambient configuration: environment variables and host properties.
//!
//! Steps never read `std::env` directly. They go through the
//! [`EnvProvider`] attached to their [`StepContext`](crate::StepContext),
//! which keeps default resolution testable without mutating process
//! state. The process-wide property store mirrors the host pattern of
//! `-Dkey=value` switches set once at startup.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

static PROPERTIES: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Sets a process-wide host property, replacing any previous value.
pub fn set_property(key: impl Into<String>, value: impl Into<String>) {
    let mut store = PROPERTIES.write().unwrap_or_else(|e| e.into_inner());
    store.insert(key.into(), value.into());
}

/// Looks up a process-wide host property.
pub fn property(key: &str) -> Option<String> {
    let store = PROPERTIES.read().unwrap_or_else(|e| e.into_inner());
    store.get(key).cloned()
}

/// Parses a configuration flag: `true` in any case combination is true,
/// every other string (including padded `" true"`) is false.
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Source of environment variables and host properties for a step run.
///
/// The two channels are looked up separately because defaults can be
/// switched on through either one: properties are per-host operator
/// switches, environment variables travel with the process.
pub trait EnvProvider: Send + Sync {
    /// Raw environment variable lookup.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Raw host property lookup.
    fn property(&self, key: &str) -> Option<String>;

    /// Environment variable interpreted as a boolean flag.
    ///
    /// Unset variables are false.
    fn env_flag(&self, name: &str) -> bool {
        self.env_var(name)
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
    }

    /// Host property interpreted as a boolean flag.
    ///
    /// Unset properties are false.
    fn property_flag(&self, key: &str) -> bool {
        self.property(key)
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
    }
}

/// [`EnvProvider`] backed by the real process environment and the
/// process-wide property store.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn property(&self, key: &str) -> Option<String> {
        property(key)
    }
}
