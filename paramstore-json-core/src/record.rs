//! Parameter records as returned by a parameter store

use serde::{Deserialize, Serialize};

/// How a parameter's value is laid out in the tree
///
/// `Plain` covers both plaintext and decrypted secret values; once decrypted
/// the two are indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Single string value (`String` or `SecureString`)
    Plain,
    /// Comma-separated list of strings (`StringList`)
    List,
}

impl ParameterKind {
    /// Map a store type name onto a kind
    ///
    /// Only `StringList` is split; every other type name, known or not,
    /// is stored verbatim.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "StringList" => ParameterKind::List,
            _ => ParameterKind::Plain,
        }
    }
}

/// One leaf fact fetched from the store
///
/// `full_path` uses `/`-delimited segments and starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub full_path: String,
    pub kind: ParameterKind,
    pub value: String,
}

impl ParameterRecord {
    pub fn new(
        full_path: impl Into<String>,
        kind: ParameterKind,
        value: impl Into<String>,
    ) -> Self {
        Self {
            full_path: full_path.into(),
            kind,
            value: value.into(),
        }
    }

    /// Convenience constructor for a `Plain` record
    pub fn plain(full_path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(full_path, ParameterKind::Plain, value)
    }

    /// Convenience constructor for a `List` record
    pub fn list(full_path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(full_path, ParameterKind::List, value)
    }
}
