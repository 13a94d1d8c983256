//! Error types for the AWS parameter source

use paramstore_json_core::ReaderError;
use thiserror::Error;

/// Errors from setting up an AWS parameter source
///
/// Per-request failures are reported as [`paramstore_json_core::SourceError`]
/// through the `ParameterSource` trait; these cover client construction.
#[derive(Debug, Error)]
pub enum AwsSourceError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing region configuration
    #[error("Missing AWS region configuration")]
    MissingRegion,
}

impl AwsSourceError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for AWS source setup
pub type Result<T> = std::result::Result<T, AwsSourceError>;

// Convert to reader errors
impl From<AwsSourceError> for ReaderError {
    fn from(err: AwsSourceError) -> Self {
        match err {
            AwsSourceError::InvalidConfig(msg) => ReaderError::invalid_config(msg),
            AwsSourceError::MissingRegion => {
                ReaderError::invalid_config("Missing AWS region configuration")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_reader_error() {
        let err: ReaderError = AwsSourceError::MissingRegion.into();
        assert!(matches!(err, ReaderError::InvalidConfig(_)));

        let err: ReaderError = AwsSourceError::invalid_config("bad page_size").into();
        match err {
            ReaderError::InvalidConfig(msg) => assert!(msg.contains("page_size")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }
}
