//! Error types for parameter reads

use thiserror::Error;

/// Errors raised by a [`ParameterSource`](crate::ParameterSource)
///
/// These mirror the failure classes a remote parameter store can report:
/// - `Throttled` indicates rate limiting (the caller may back off and retry)
/// - `NotFound` / `InvalidParameter` indicate a bad request path
/// - Others are generally fatal for the read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// I/O or network error
    #[error("I/O error: {0}")]
    Io(String),

    /// Path or parameter not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unauthorized - invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden - insufficient permissions (including KMS decrypt denials)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Throttled - rate limited
    #[error("Throttled: {0}")]
    Throttled(String),

    /// The store rejected the request (bad path, bad token, bad page size)
    #[error("Invalid parameter request: {0}")]
    InvalidParameter(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::Throttled(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type for [`ParameterSource`](crate::ParameterSource) calls
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors surfaced by [`JsonReader`](crate::JsonReader)
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The fetch capability failed; the read produced no result
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Invalid reader configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReaderError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type alias using ReaderError
pub type Result<T> = std::result::Result<T, ReaderError>;
