//! The read entry point: parameters under a path, as one JSON document

use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::normalize::normalize;
use crate::pagination;
use crate::source::ParameterSource;
use crate::value::{ParamMap, ParamValue};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fmt::Debug;
use tracing::Instrument;

/// Reads a parameter subtree and rebuilds it as nested JSON
///
/// Holds no state between reads; concurrent reads on the same reader are
/// independent, each building its own tree.
#[derive(Clone)]
pub struct JsonReader<S> {
    source: S,
    configuration: ReaderConfig,
}

impl<S: Debug> Debug for JsonReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonReader")
            .field("source", &self.source)
            .field("api_version", &self.configuration.api_version)
            .finish()
    }
}

impl<S: ParameterSource> JsonReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: S, configuration: ReaderConfig) -> Self {
        Self {
            source,
            configuration,
        }
    }

    /// Configuration this reader was built with
    pub fn configuration(&self) -> &ReaderConfig {
        &self.configuration
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read every parameter under `path` as a JSON value
    ///
    /// `path` may be empty to read from the root. Nothing stored under `path`
    /// yields `{}`. Any source error fails the whole read.
    pub async fn read(&self, path: &str) -> Result<JsonValue> {
        Ok(self.read_tree(path).await?.into_json())
    }

    /// Read every parameter under `path` as a normalized tree
    ///
    /// The root is normalized like any other mapping, so a path whose direct
    /// children are all indices reads as a sequence.
    pub async fn read_tree(&self, path: &str) -> Result<ParamValue> {
        let span = tracing::debug_span!("parameter_read", path);
        async move {
            let mut root = ParamMap::new();
            let folded = pagination::fold_pages(&self.source, path, &mut root).await?;
            let keys = root.len();
            let tree = normalize(ParamValue::Mapping(root));

            tracing::debug!(records = folded, keys, "parameters read");
            Ok::<_, ReaderError>(tree)
        }
        .instrument(span)
        .await
    }

    /// Read every parameter under `path` into a caller-defined type
    pub async fn read_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let tree = self.read_tree(path).await?;
        Ok(serde_json::from_value(tree.into_json())?)
    }
}
