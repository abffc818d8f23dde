// --- File: crates/bookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Bookify errors.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// `From<SpecificError> for BookifyError`.
#[derive(Error, Debug)]
pub enum BookifyError {
    /// Error occurred while parsing data (dates, times, payloads)
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication against an upstream provider
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during request validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A required field was absent from the request
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Error occurred during an upstream service call
    #[error("Upstream service error: {service_name} - {message}")]
    UpstreamError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., slot already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// No bookable slots remain for the requested day
    #[error("No availability: {0}")]
    NoAvailability(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookifyError {
    fn status_code(&self) -> u16 {
        match self {
            BookifyError::ParseError(_) => 400,
            BookifyError::ConfigError(_) => 500,
            BookifyError::AuthError(_) => 502,
            BookifyError::ValidationError(_) => 400,
            BookifyError::MissingField(_) => 400,
            BookifyError::UpstreamError { .. } => 502,
            BookifyError::ConflictError(_) => 409,
            BookifyError::NotFoundError(_) => 404,
            BookifyError::NoAvailability(_) => 400,
            BookifyError::TimeoutError(_) => 504,
            BookifyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for BookifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BookifyError::TimeoutError(err.to_string())
        } else {
            BookifyError::UpstreamError {
                service_name: "http".to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for BookifyError {
    fn from(err: serde_json::Error) -> Self {
        BookifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BookifyError {
    fn from(err: std::io::Error) -> Self {
        BookifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConflictError(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(service_name: &str, message: T) -> BookifyError {
    BookifyError::UpstreamError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(BookifyError::ParseError("bad date".into()).status_code(), 400);
        assert_eq!(BookifyError::MissingField("email".into()).status_code(), 400);
        assert_eq!(conflict("slot taken").status_code(), 409);
        assert_eq!(not_found("no such event").status_code(), 404);
    }

    #[test]
    fn upstream_errors_map_to_5xx() {
        assert_eq!(upstream_error("gcal", "boom").status_code(), 502);
        assert_eq!(internal_error("oops").status_code(), 500);
        assert_eq!(BookifyError::TimeoutError("slow".into()).status_code(), 504);
    }
}
