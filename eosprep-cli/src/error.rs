//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Corpus directory missing or unreadable
    CorpusNotFound(String),
    /// Requested dataset variant has not been written yet
    DatasetNotFound(String),
    /// Configuration error
    ConfigError(String),
    /// Pipeline error from the engine
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::CorpusNotFound(path) => write!(f, "Corpus not found: {path}"),
            CliError::DatasetNotFound(msg) => write!(f, "Dataset not found: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
