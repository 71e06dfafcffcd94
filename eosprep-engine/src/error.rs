//! Engine error types
//!
//! Wraps [`CoreError`] and adds the failures that come from touching the
//! filesystem: corpus access, array storage and config files.

use eosprep_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Corpus directory or one of its files could not be read
    #[error("corpus unavailable at {}: {source}", path.display())]
    CorpusUnavailable {
        /// Directory or file that failed
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Reading or writing a stored array or manifest failed
    #[error("storage error at {}: {reason}", path.display())]
    Storage {
        /// File being read or written
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Configuration file could not be parsed or holds invalid values
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn corpus(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::CorpusUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        EngineError::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
