use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Network error: {0}")]
    #[diagnostic(code(project_calendar::network))]
    Network(String),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(project_calendar::invalid_argument))]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(project_calendar::not_found))]
    NotFound(String),

    #[error("Already applied to project {0}")]
    #[diagnostic(code(project_calendar::already_applied))]
    AlreadyApplied(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(project_calendar::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(project_calendar::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(project_calendar::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(project_calendar::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(project_calendar::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(project_calendar::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Transport failures and timeouts are all transient from the caller's view
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Serialization(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

/// Type alias for Result with our Error type
pub type ScheduleResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create network errors
pub fn network_error(message: &str) -> Error {
    Error::Network(message.to_string())
}

/// Helper to create precondition errors
pub fn invalid_argument(message: &str) -> Error {
    Error::InvalidArgument(message.to_string())
}

/// Helper to create lookup errors
pub fn not_found(message: &str) -> Error {
    Error::NotFound(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
