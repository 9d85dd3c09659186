//! Error type returned by modal loaders.
//!
//! There is exactly one failure class: the loader rejected. The modal does not
//! recover from it; it logs the error and keeps showing the loading
//! placeholder. Callers that want retries or an error banner wrap their loader.

use thiserror::Error;

/// A loader could not produce a page.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The loader rejected with a message.
    #[error("loader rejected: {0}")]
    Rejected(String),

    /// The loader's backing service failed.
    #[error("loader rejected: {0}")]
    Service(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for loader calls.
pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    /// Creates a rejection with a message.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Wraps a service error.
    pub fn service<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Service(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::rejected("timeout");
        assert_eq!(err.to_string(), "loader rejected: timeout");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = LoadError::service(io);
        assert_eq!(err.to_string(), "loader rejected: connection reset");
        assert!(matches!(err, LoadError::Service(_)));
    }
}
