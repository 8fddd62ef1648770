// src/error.rs

//! Unified error handling for the race-data pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream could not be reached, timed out, or returned an unparsable body
    #[error("Transport error for {path}: {cause}")]
    Transport { path: String, cause: String },

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned {status} for {path}")]
    Upstream { status: u16, path: String },

    /// Upstream answered 2xx but a required field is missing
    #[error("Malformed response for {context}: {message}")]
    Malformed { context: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a transport error for a resource path.
    pub fn transport(path: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::Transport {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    /// Create an upstream status error for a resource path.
    pub fn upstream(status: u16, path: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            path: path.into(),
        }
    }

    /// Create a malformed-response error with context.
    pub fn malformed(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Malformed {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Status code reported by the upstream, if this error carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
