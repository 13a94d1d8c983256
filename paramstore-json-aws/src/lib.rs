//! AWS parameter sources for paramstore-json
//!
//! This crate provides AWS-specific `ParameterSource` implementations:
//!
//! - **SSM Parameter Store** (`ssm` feature): enumerate parameters with
//!   `GetParametersByPath`, recursive and decrypted
//!
//! ## Features
//!
//! - `ssm` (default): Enable the SSM Parameter Store source
//! - `aws-testcontainers`: Enable LocalStack integration tests (requires Docker)
//!
//! ## Usage
//!
//! ```ignore
//! use paramstore_json_aws::{json_reader, SsmConfig, SsmParameterSource};
//! use paramstore_json_core::{JsonReader, ReaderConfig};
//!
//! // From the default credential/region chain
//! let reader = json_reader(ReaderConfig::new().with_api_version("2014-11-06")).await?;
//! let json = reader.read("/myapp/prod").await?;
//!
//! // Or with explicit client settings
//! let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
//! let source = SsmParameterSource::new(&sdk_config, SsmConfig {
//!     timeout_ms: Some(30000),
//!     page_size: Some(10),
//!     ..Default::default()
//! })
//! .await?;
//! let reader = JsonReader::new(source);
//! ```

pub mod error;

#[cfg(feature = "ssm")]
pub mod ssm;

// Re-export main types
pub use error::{AwsSourceError, Result};

#[cfg(feature = "ssm")]
pub use ssm::{SsmConfig, SsmParameterSource, SSM_API_VERSION};

// Re-export core types for convenience
pub use paramstore_json_core::{JsonReader, ParameterSource, ReaderConfig};

/// Build a reader over SSM from the default AWS configuration chain
///
/// `configuration.api_version` is forwarded to the SSM client.
#[cfg(feature = "ssm")]
pub async fn json_reader(
    configuration: ReaderConfig,
) -> paramstore_json_core::Result<JsonReader<SsmParameterSource>> {
    let source = SsmParameterSource::from_env(SsmConfig::from(&configuration)).await?;
    Ok(JsonReader::with_config(source, configuration))
}
