// --- File: crates/pushlink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all pushlink errors.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// From<SpecificError> for PushlinkError.
#[derive(Error, Debug)]
pub enum PushlinkError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, PushlinkError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, PushlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, PushlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| PushlinkError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, PushlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| PushlinkError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for PushlinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PushlinkError::TimeoutError(err.to_string())
        } else {
            PushlinkError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PushlinkError {
    fn from(err: serde_json::Error) -> Self {
        PushlinkError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> PushlinkError {
    PushlinkError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> PushlinkError {
    PushlinkError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn timeout_error<T: fmt::Display>(message: T) -> PushlinkError {
    PushlinkError::TimeoutError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> PushlinkError {
    PushlinkError::InternalError(message.to_string())
}
