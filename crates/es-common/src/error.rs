//! Error types for eventsift.

use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Result type alias for eventsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for eventsift.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Plugin errors (40-49)
    #[error("plugin action failed: {0}")]
    Plugin(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::Plugin(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Process exit code for a fatal occurrence of this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Config(_) => ExitCode::ConfigError,
            Error::Json(_) => ExitCode::ParseError,
            _ => ExitCode::InternalError,
        }
    }
}
