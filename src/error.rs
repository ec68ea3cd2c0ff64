//! Error types for the caption lifecycle core.
//!
//! `CaptionError` covers the request path (validation, provider call,
//! clipboard); `ConfigError` covers configuration loading. Every variant is
//! recovered locally by the controller and surfaced as a single user-visible
//! message; none is fatal to the process.

use thiserror::Error;

/// Errors produced while driving a caption request.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The uploaded file failed client-side validation
    #[error("{reason}")]
    Rejected { reason: String },

    /// Credential absent or still set to the placeholder sentinel
    #[error("setup required — credential missing or placeholder")]
    MissingCredential,

    /// Transport failure or non-2xx status from the provider
    #[error("API request failed: {status_text}")]
    RequestFailed {
        status_text: String,
        status_code: Option<u16>,
    },

    /// Provider returned 2xx but the body had no usable caption record
    #[error("invalid response from AI model")]
    MalformedResponse,

    /// System clipboard could not be reached; never surfaced to the user
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for caption results.
pub type Result<T> = std::result::Result<T, CaptionError>;
