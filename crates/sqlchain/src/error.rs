//! Error types for sqlchain

use thiserror::Error;

/// Result type alias for sqlchain operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Boxed error produced by a [`Backend`](crate::Backend).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum StmtError {
    /// Malformed or missing builder input (empty table name, empty mapping, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend capability reported a failure while executing a statement
    #[error("Backend error: {0}")]
    Backend(#[source] BoxError),

    /// Database connection settings could not be parsed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

impl StmtError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap a backend failure, keeping it reachable through `source()`
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Backend(err.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

impl From<toml::de::Error> for StmtError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[test]
    fn backend_keeps_source() {
        let err = StmtError::backend(Reset);
        assert!(err.is_backend());
        assert_eq!(err.to_string(), "Backend error: connection reset");
        let source = err.source().expect("source");
        assert!(source.downcast_ref::<Reset>().is_some());
    }

    #[test]
    fn invalid_argument_message() {
        let err = StmtError::invalid_argument("table name is empty");
        assert!(err.is_invalid_argument());
        assert!(!err.is_backend());
        assert_eq!(err.to_string(), "Invalid argument: table name is empty");
    }
}
