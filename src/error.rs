//! Error types for yt2gif
//!
//! This module provides error handling for the service, including:
//! - Request validation errors (bad body, bad URL, bad time range)
//! - Tool discovery errors (yt-dlp or ffmpeg missing on the host)
//! - Pipeline stage failures carrying the external tool's console output
//! - HTTP status code mapping for API integration

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for yt2gif operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yt2gif
///
/// Every variant renders as a human-readable message, which is what the
/// `/convert` endpoint reports back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Request body could not be parsed or a field had the wrong shape
    #[error("{0}")]
    InvalidInput(String),

    /// No recognized YouTube URL shape matched the input
    #[error("Invalid YouTube URL")]
    InvalidUrl(String),

    /// Requested clip length is zero, negative, or longer than allowed
    #[error("Duration must be between 0 and {max} seconds")]
    InvalidDuration {
        /// Requested duration in seconds (end - start)
        duration: f64,
        /// Maximum allowed duration in seconds
        max: f64,
    },

    /// An external binary could not be found on the host
    #[error("{tool} is not installed. Install with: {hint}")]
    MissingTool {
        /// Binary name (e.g., "yt-dlp")
        tool: &'static str,
        /// Installation hint shown to the user
        hint: &'static str,
    },

    /// Both the section download and the full-download fallback failed
    #[error("Failed to download video{}", tool_detail(.output))]
    DownloadFailed {
        /// Console output of the last download attempt
        output: String,
    },

    /// Trimming the full download did not produce the clip
    #[error("Failed to trim video{}", tool_detail(.output))]
    TrimFailed {
        /// Console output of the trim invocation
        output: String,
    },

    /// Palette generation did not produce the palette image
    #[error("Failed to generate color palette{}", tool_detail(.output))]
    PaletteFailed {
        /// Console output of the palette invocation
        output: String,
    },

    /// Final encode did not produce the output clip
    #[error("Failed to create GIF{}", tool_detail(.output))]
    EncodeFailed {
        /// Console output of the encode invocation
        output: String,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_dir")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a working directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Suffix carrying a tool's console output, empty when the tool printed nothing
fn tool_detail(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {output}")
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::InvalidInput(_) => 400,
            Error::InvalidUrl(_) => 400,
            Error::InvalidDuration { .. } => 400,

            // 502 Bad Gateway - External tool did not deliver
            Error::DownloadFailed { .. } => 502,
            Error::TrimFailed { .. } => 502,
            Error::PaletteFailed { .. } => 502,
            Error::EncodeFailed { .. } => 502,

            // 503 Service Unavailable
            Error::MissingTool { .. } => 503,

            // 500 Internal Server Error - Server-side issues
            Error::Config { .. } => 500,
            Error::Io(_) => 500,
            Error::CreateDir { .. } => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::InvalidUrl(_) => "invalid_url",
            Error::InvalidDuration { .. } => "invalid_duration",
            Error::MissingTool { .. } => "missing_tool",
            Error::DownloadFailed { .. } => "download_failed",
            Error::TrimFailed { .. } => "trim_failed",
            Error::PaletteFailed { .. } => "palette_failed",
            Error::EncodeFailed { .. } => "encode_failed",
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::CreateDir { .. } => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}
