//! Reader configuration

use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Construction-time configuration for a [`JsonReader`](crate::JsonReader)
///
/// Only `apiVersion` is recognized; it is handed to the store client at
/// initialization and not interpreted here. Unknown fields are ignored so
/// that a wider client configuration object can be passed as-is.
///
/// ```ignore
/// let config = ReaderConfig::from_json(&json!({"apiVersion": "2014-11-06"}))?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Parse from a JSON configuration object
    ///
    /// `null` yields the default configuration.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Object(_) => Ok(Self::deserialize(value)?),
            other => Err(ReaderError::invalid_config(format!(
                "reader configuration must be an object, got {}",
                other
            ))),
        }
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }
}
