use thiserror::Error;

/// Core error type for Millrace steps
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// No step is registered under the requested function name
    #[error("Unknown step: {0}")]
    UnknownStep(String),

    /// Declarative arguments could not be bound to a step configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Step arguments or inputs failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Input/output error
    #[error("Input/output error: {0}")]
    IOError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Step execution error
    #[error("Step execution error: {0}")]
    ExecutionError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for StepError {
    fn from(err: serde_json::Error) -> Self {
        StepError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for StepError {
    fn from(err: std::io::Error) -> Self {
        StepError::IOError(err.to_string())
    }
}

impl From<String> for StepError {
    fn from(err: String) -> Self {
        StepError::Other(err)
    }
}

impl From<&str> for StepError {
    fn from(err: &str) -> Self {
        StepError::Other(err.to_string())
    }
}
