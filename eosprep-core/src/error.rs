//! Core error types (deterministic only)

use thiserror::Error;

/// Errors raised by the I/O-free parts of the pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A configuration value is out of range or unknown
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Array dimensions disagree with the codec or dataset they are used with
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A stored label is neither 0 nor 1
    #[error("invalid label value {0}: expected 0 or 1")]
    InvalidLabel(i8),
}

impl CoreError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        CoreError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        CoreError::ShapeMismatch(msg.into())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("mode must be 'strict' or 'ratio'");
        assert_eq!(
            err.to_string(),
            "invalid configuration: mode must be 'strict' or 'ratio'"
        );

        let err = CoreError::InvalidLabel(3);
        assert_eq!(err.to_string(), "invalid label value 3: expected 0 or 1");
    }
}
