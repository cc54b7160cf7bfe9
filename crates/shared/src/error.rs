//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Library code reports its own domain errors; this type is what those errors
/// become once they reach a process edge such as the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The engine rejected the input.
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// The command line was malformed.
    #[error("Usage error: {0}")]
    Usage(String),
}

impl AppError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Calculation(_) => "CALCULATION_ERROR",
            Self::Usage(_) => "USAGE_ERROR",
        }
    }

    /// Returns the process exit code (sysexits.h values where one fits).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Calculation(_) => 1,
            Self::Usage(_) => 64,
            Self::Parse(_) => 65,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
