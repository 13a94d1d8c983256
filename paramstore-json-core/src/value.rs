//! Tree values built from parameter paths
//!
//! [`ParamValue`] is the explicit sum type the tree builder writes into and
//! the normalizer rewrites. It converts losslessly into `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping level of the tree, keyed by path segment
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A node of the reconstructed parameter tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Hole in a sparse sequence
    Null,
    /// Leaf string value
    Scalar(String),
    /// Ordered values (split lists, or mappings recognized as arrays)
    Sequence(Vec<ParamValue>),
    /// Nested mapping
    Mapping(ParamMap),
}

impl ParamValue {
    /// Empty mapping
    pub fn mapping() -> Self {
        ParamValue::Mapping(ParamMap::new())
    }

    pub fn as_mapping(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ParamValue::Mapping(_))
    }

    /// Convert into a `serde_json::Value`
    pub fn into_json(self) -> JsonValue {
        JsonValue::from(self)
    }

    /// Build a tree value from JSON
    ///
    /// Numbers and booleans become their string rendering, since the store
    /// only ever holds strings.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ParamValue::Null,
            JsonValue::Bool(b) => ParamValue::Scalar(b.to_string()),
            JsonValue::Number(n) => ParamValue::Scalar(n.to_string()),
            JsonValue::String(s) => ParamValue::Scalar(s),
            JsonValue::Array(items) => {
                ParamValue::Sequence(items.into_iter().map(ParamValue::from_json).collect())
            }
            JsonValue::Object(map) => ParamValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ParamValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Mapping(map)
    }
}

impl From<ParamValue> for JsonValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Null => JsonValue::Null,
            ParamValue::Scalar(s) => JsonValue::String(s),
            ParamValue::Sequence(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            ParamValue::Mapping(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = JsonValue::from(self.clone());
        write!(f, "{}", json)
    }
}
