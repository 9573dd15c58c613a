// --- File: crates/huntclub_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all hunting club crates.
///
/// Feature crates define their own error enums and convert into this one at
/// the HTTP boundary via `From<SpecificError> for HuntclubError`.
#[derive(Error, Debug)]
pub enum HuntclubError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The request itself is invalid
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred during an external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error to the HTTP status code it should be answered with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for HuntclubError {
    fn status_code(&self) -> u16 {
        match self {
            HuntclubError::HttpError(_) => 500,
            HuntclubError::ParseError(_) => 400,
            HuntclubError::ConfigError(_) => 500,
            HuntclubError::ValidationError(_) => 400,
            HuntclubError::ExternalServiceError { .. } => 502,
            HuntclubError::TimeoutError(_) => 504,
            HuntclubError::InternalError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for HuntclubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HuntclubError::TimeoutError(err.to_string())
        } else {
            HuntclubError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HuntclubError {
    fn from(err: serde_json::Error) -> Self {
        HuntclubError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for HuntclubError {
    fn from(err: std::io::Error) -> Self {
        HuntclubError::InternalError(err.to_string())
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> HuntclubError {
    HuntclubError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> HuntclubError {
    HuntclubError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
