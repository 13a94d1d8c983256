//! Folding flat parameter records into a nested mapping
//!
//! Each record addresses one leaf: its path, minus the query prefix, names
//! the chain of mappings to walk and the key to write at the end.
//!
//! Path collisions never fail the fold:
//! - the same leaf written twice keeps the last value
//! - a leaf and a deeper path through the same key keep the mapping, so the
//!   outcome does not depend on record order

use crate::record::{ParameterKind, ParameterRecord};
use crate::value::{ParamMap, ParamValue};

/// Path segments of `full_path` below `prefix`
///
/// The leading `/` is dropped. A path that does not continue `prefix` at a
/// segment boundary is taken whole. Returns an empty vector when nothing is
/// left after the prefix.
pub fn relative_segments<'a>(full_path: &'a str, prefix: &str) -> Vec<&'a str> {
    let rest = match full_path.strip_prefix(prefix) {
        Some(rest) if prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/') => rest,
        _ => {
            if !prefix.is_empty() {
                tracing::warn!(full_path, prefix, "parameter path outside query prefix");
            }
            full_path
        }
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split('/').collect()
}

/// Leaf value for a record: raw string, or comma-split list
pub fn leaf_value(kind: ParameterKind, value: String) -> ParamValue {
    match kind {
        ParameterKind::Plain => ParamValue::Scalar(value),
        ParameterKind::List => {
            ParamValue::Sequence(value.split(',').map(ParamValue::from).collect())
        }
    }
}

/// Write a single record into `root`
///
/// Returns `false` when the record has no key below `prefix` and was skipped.
pub fn insert_record(root: &mut ParamMap, prefix: &str, record: ParameterRecord) -> bool {
    let ParameterRecord {
        full_path,
        kind,
        value,
    } = record;

    let segments = relative_segments(&full_path, prefix);
    let Some((leaf, parents)) = segments.split_last() else {
        tracing::warn!(
            full_path = %full_path,
            prefix,
            "parameter has no key below prefix, skipped"
        );
        return false;
    };

    let mut node = root;
    for segment in parents {
        node = child_mapping(node, segment, &full_path);
    }

    match node.get_mut(*leaf) {
        Some(ParamValue::Mapping(_)) => {
            tracing::warn!(
                full_path = %full_path,
                "leaf collides with nested parameters, keeping nested"
            );
        }
        Some(existing) => {
            tracing::trace!(full_path = %full_path, "overwriting duplicate parameter");
            *existing = leaf_value(kind, value);
        }
        None => {
            node.insert((*leaf).to_string(), leaf_value(kind, value));
        }
    }
    true
}

/// Fold every record into `root`
///
/// Records may arrive in any order, interleaved across pages. Returns the
/// number of records written; skipped records are not counted.
pub fn fold<I>(root: &mut ParamMap, prefix: &str, records: I) -> usize
where
    I: IntoIterator<Item = ParameterRecord>,
{
    let mut folded = 0;
    for record in records {
        tracing::trace!(full_path = %record.full_path, kind = ?record.kind, "fold parameter");
        if insert_record(root, prefix, record) {
            folded += 1;
        }
    }
    folded
}

/// Build a fresh tree from `records`
pub fn build_tree<I>(prefix: &str, records: I) -> ParamMap
where
    I: IntoIterator<Item = ParameterRecord>,
{
    let mut root = ParamMap::new();
    fold(&mut root, prefix, records);
    root
}

/// Mapping stored under `key`, created if missing
///
/// A leaf already stored at `key` is replaced by the mapping.
fn child_mapping<'a>(node: &'a mut ParamMap, key: &str, full_path: &str) -> &'a mut ParamMap {
    let entry = node
        .entry(key.to_string())
        .or_insert_with(ParamValue::mapping);
    if !entry.is_mapping() {
        tracing::warn!(full_path, key, "nested parameter replaces leaf value");
        *entry = ParamValue::mapping();
    }
    match entry {
        ParamValue::Mapping(map) => map,
        _ => unreachable!("entry was just made a mapping"),
    }
}
