//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout gymdb.
//! Every error is fatal to the CLI run: library code propagates with `?` and
//! `main` logs the error and exits non-zero.
//!
//! # Error Categories
//! - `ConfigError`: Environment file missing, malformed port or SSL mode
//! - `ConnectionFailed`: Database connection errors
//! - `QueryFailed`: Statement execution errors
//! - `InvalidInput`: Malformed identifiers, numbers, or unreadable input
//! - `ValidationFailed`: A value or column name outside its whitelist
//! - `EngineError`: Backend-specific errors

use thiserror::Error;

/// Main error type for gymdb operations
#[derive(Error, Debug)]
pub enum GymError {
    /// Configuration error (env file not found, invalid port, etc.)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Statement execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Malformed input (UUID, integer, decimal) or a failed prompt read
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Value or column outside its whitelist
    #[error("{0}")]
    ValidationFailed(String),

    /// Engine-specific database error
    #[error("Engine error ({engine}): {detail}")]
    EngineError { engine: String, detail: String },
}

impl GymError {
    /// Stable error code string
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::QueryFailed(_) => "QUERY_FAILED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::EngineError { .. } => "ENGINE_ERROR",
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a query failed error
    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a whitelist validation error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    /// Create an engine-specific error
    pub fn engine_error(engine: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::EngineError { engine: engine.into(), detail: detail.into() }
    }
}

impl From<std::io::Error> for GymError {
    fn from(err: std::io::Error) -> Self {
        Self::InvalidInput(format!("Terminal I/O failed: {err}"))
    }
}

impl From<uuid::Error> for GymError {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidInput(format!("invalid member id: {err}"))
    }
}

/// Result type alias for gymdb operations
pub type Result<T> = std::result::Result<T, GymError>;
