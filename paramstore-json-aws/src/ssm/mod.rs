//! SSM Parameter Store source implementation
//!
//! Provides `SsmParameterSource` which implements the core `ParameterSource`
//! trait on top of `GetParametersByPath`.
//!
//! ## API version
//!
//! The SSM API has a single published version, `2014-11-06`, which the SDK
//! is generated from. A configured `api_version` is carried on the source
//! as given; any other value is logged with a warning and otherwise ignored.
//!
//! ## Timeout Configuration
//!
//! The `timeout_ms` setting controls the total operation timeout, which **includes
//! SDK retry time**. Retries happen inside the SDK per page; the reader itself
//! never retries a failed page.

pub mod convert;

use crate::error::{AwsSourceError, Result};
use async_trait::async_trait;
use aws_sdk_ssm::Client;
use aws_smithy_types::retry::RetryConfig;
use aws_smithy_types::timeout::TimeoutConfig;
use convert::{map_ssm_error, parameter_to_record, request_path};
use paramstore_json_core::{Page, PageRequest, ParameterSource, ReaderConfig, SourceResult};
use std::fmt::Debug;
use std::time::Duration;

/// The only SSM API version
pub const SSM_API_VERSION: &str = "2014-11-06";

/// Largest `MaxResults` accepted by `GetParametersByPath`
pub const MAX_PAGE_SIZE: u32 = 10;

/// SSM parameter source configuration
#[derive(Debug, Clone, Default)]
pub struct SsmConfig {
    /// API version requested by the caller
    pub api_version: Option<String>,
    /// AWS region (optional, uses SDK default if not specified)
    pub region: Option<String>,
    /// Optional endpoint override (e.g. LocalStack)
    pub endpoint: Option<String>,
    /// Operation timeout in milliseconds (optional)
    pub timeout_ms: Option<u64>,
    /// Max retries after the initial attempt
    pub max_retries: Option<u32>,
    /// Initial backoff for retries in milliseconds (randomized with jitter by SDK)
    pub retry_base_delay_ms: Option<u64>,
    /// Max backoff for retries in milliseconds
    pub retry_max_delay_ms: Option<u64>,
    /// Parameters per page (`MaxResults`, 1..=10); service default if unset
    pub page_size: Option<u32>,
}

impl SsmConfig {
    /// Check settings that the service would otherwise reject per request
    ///
    /// An unknown `api_version` is not an error.
    pub fn validate(&self) -> Result<()> {
        if let Some(version) = &self.api_version {
            if version != SSM_API_VERSION {
                tracing::warn!(
                    api_version = %version,
                    supported = SSM_API_VERSION,
                    "unknown SSM API version, requests use the supported version"
                );
            }
        }
        if let Some(page_size) = self.page_size {
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                return Err(AwsSourceError::invalid_config(format!(
                    "page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, page_size
                )));
            }
        }
        Ok(())
    }
}

impl From<&ReaderConfig> for SsmConfig {
    fn from(config: &ReaderConfig) -> Self {
        SsmConfig {
            api_version: config.api_version.clone(),
            ..Default::default()
        }
    }
}

/// SSM-backed parameter source
///
/// Each `fetch_page` call is exactly one `GetParametersByPath` request.
#[derive(Clone)]
pub struct SsmParameterSource {
    client: Client,
    api_version: Option<String>,
    page_size: Option<u32>,
}

impl Debug for SsmParameterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterSource")
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl SsmParameterSource {
    /// Create a new SSM parameter source
    ///
    /// # Arguments
    ///
    /// * `sdk_config` - AWS SDK configuration (from `aws_config::load_defaults()`)
    /// * `config` - SSM-specific configuration (region, timeout, retries, page size)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    /// let source = SsmParameterSource::new(&sdk_config, SsmConfig {
    ///     api_version: Some("2014-11-06".to_string()),
    ///     timeout_ms: Some(30000),
    ///     ..Default::default()
    /// })
    /// .await?;
    /// ```
    pub async fn new(sdk_config: &aws_config::SdkConfig, config: SsmConfig) -> Result<Self> {
        config.validate()?;

        // Verify region is configured
        if sdk_config.region().is_none() && config.region.is_none() {
            return Err(AwsSourceError::MissingRegion);
        }

        // Inherit from SdkConfig (HTTP client, credentials, sleep impl) then apply overrides
        let mut builder = aws_sdk_ssm::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_ssm::config::Region::new(region.clone()));
        }

        // Apply endpoint override if configured (e.g. LocalStack)
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if config.max_retries.is_some()
            || config.retry_base_delay_ms.is_some()
            || config.retry_max_delay_ms.is_some()
        {
            // AWS SDK uses "max attempts" = initial attempt + retries
            let max_attempts = config.max_retries.unwrap_or(0).saturating_add(1).max(1);

            let mut retry_config = RetryConfig::standard().with_max_attempts(max_attempts);

            if let Some(ms) = config.retry_base_delay_ms {
                retry_config = retry_config.with_initial_backoff(Duration::from_millis(ms));
            }
            if let Some(ms) = config.retry_max_delay_ms {
                retry_config = retry_config.with_max_backoff(Duration::from_millis(ms));
            }

            builder = builder.retry_config(retry_config);
        }

        if let Some(timeout_ms) = config.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        let client = Client::from_conf(builder.build());

        tracing::debug!(
            api_version = config.api_version.as_deref().unwrap_or(SSM_API_VERSION),
            page_size = ?config.page_size,
            "SSM parameter source created"
        );

        Ok(Self {
            client,
            api_version: config.api_version,
            page_size: config.page_size,
        })
    }

    /// Load the default AWS configuration chain and create a source
    pub async fn from_env(config: SsmConfig) -> Result<Self> {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(&sdk_config, config).await
    }

    /// Create from a pre-built client (for testing)
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            api_version: None,
            page_size: None,
        }
    }

    /// API version this source was configured with
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn fetch_page(&self, request: &PageRequest) -> SourceResult<Page> {
        let path = request_path(&request.prefix);

        let response = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(request.recursive)
            .with_decryption(request.with_decryption)
            .set_max_results(self.page_size.map(|n| n as i32))
            .set_next_token(request.next_token.clone())
            .send()
            .await
            .map_err(|e| map_ssm_error(e, path))?;

        let records = response
            .parameters()
            .iter()
            .filter_map(parameter_to_record)
            .collect();

        Ok(Page::new(
            records,
            response.next_token().map(|s| s.to_string()),
        ))
    }
}
