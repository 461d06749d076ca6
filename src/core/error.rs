//! Custom error types for Cratchit
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Cratchit operations
#[derive(Error, Debug)]
pub enum CratchitError {
    /// IO errors (environment file, terminal streams)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted environment line that does not read as `"key":"value"`
    #[error("Malformed entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience Result type for Cratchit operations
pub type Result<T> = std::result::Result<T, CratchitError>;

impl CratchitError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed entry error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            line,
            reason: reason.into(),
        }
    }

    /// Wrap an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = CratchitError::malformed(3, "missing colon");
        assert_eq!(err.to_string(), "Malformed entry on line 3: missing colon");
    }

    #[test]
    fn test_with_context_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CratchitError::with_context("Failed to write cratchit.env", io);
        assert_eq!(err.to_string(), "Failed to write cratchit.env: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}
