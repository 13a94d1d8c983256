//! Recognizing integer-keyed mappings as arrays
//!
//! Parameter stores have no array type, so arrays are written as numbered
//! children (`/servers/0/host`, `/servers/1/host`). After the tree is built,
//! [`normalize`] rewrites every mapping whose keys are all decimal indices
//! into a sequence ordered by index.

use crate::value::{ParamMap, ParamValue};

/// Largest index accepted when turning a mapping into a sequence
///
/// Mappings with a larger numeric key stay mappings instead of allocating a
/// mostly-empty sequence.
pub const MAX_SEQUENCE_INDEX: usize = 65_535;

/// Rewrite integer-keyed mappings into sequences, recursively
///
/// Keys need not be contiguous; missing indices become [`ParamValue::Null`].
/// The transform is idempotent.
pub fn normalize(value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Null | ParamValue::Scalar(_) => value,
        ParamValue::Sequence(items) => {
            ParamValue::Sequence(items.into_iter().map(normalize).collect())
        }
        ParamValue::Mapping(map) => normalize_mapping(map),
    }
}

/// Normalize the values of `map`, keeping it a mapping
fn normalize_values(map: ParamMap) -> ParamMap {
    map.into_iter().map(|(k, v)| (k, normalize(v))).collect()
}

/// Parse `key` as a sequence index
///
/// Only plain ASCII digit runs qualify: no sign, no whitespace.
pub fn sequence_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<usize>()
        .ok()
        .filter(|index| *index <= MAX_SEQUENCE_INDEX)
}

fn normalize_mapping(map: ParamMap) -> ParamValue {
    match sequence_layout(&map) {
        Some(len) => {
            let mut items = vec![ParamValue::Null; len];
            for (key, value) in map {
                if let Some(index) = sequence_index(&key) {
                    items[index] = normalize(value);
                }
            }
            if items.iter().any(|item| matches!(item, ParamValue::Null)) {
                tracing::debug!(len, "sparse sequence, holes filled with null");
            }
            ParamValue::Sequence(items)
        }
        None => ParamValue::Mapping(normalize_values(map)),
    }
}

/// Sequence length if every key of `map` is a distinct index
///
/// Empty mappings and keys that collide after parsing (`"1"` and `"01"`)
/// keep the mapping.
fn sequence_layout(map: &ParamMap) -> Option<usize> {
    if map.is_empty() {
        return None;
    }
    let mut seen: Vec<bool> = Vec::new();
    for key in map.keys() {
        let index = sequence_index(key)?;
        if index >= seen.len() {
            seen.resize(index + 1, false);
        }
        if std::mem::replace(&mut seen[index], true) {
            return None;
        }
    }
    Some(seen.len())
}
