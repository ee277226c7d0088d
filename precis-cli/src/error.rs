//! Error types for the CLI

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// Glob pattern could not be parsed
    InvalidPattern(String),
    /// Configuration or rules file is invalid
    ConfigError(String),
    /// Input has a format the CLI cannot read as text
    UnsupportedFormat(String),
    /// Pipeline failure for one document
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {}", pattern),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CliError::UnsupportedFormat(msg) => write!(f, "Unsupported input format: {}", msg),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
