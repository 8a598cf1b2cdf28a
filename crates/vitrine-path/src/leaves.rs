//! Leaf path enumeration
//!
//! Authoring aid: lists every addressable scalar in a sample record so the
//! property panel can offer them as field bindings.

use serde_json::Value;

/// Default descent limit for [`enumerate_leaf_paths`].
pub const DEFAULT_LEAF_DEPTH: usize = 3;

/// Collect the dotted paths of every non-object value in `record`, sorted.
///
/// Objects are descended at most `max_depth` levels below the root; an
/// object sitting at the limit is neither descended nor listed. Arrays are
/// reported as leaves.
pub fn enumerate_leaf_paths(record: &Value, max_depth: usize) -> Vec<String> {
    let mut paths = Vec::new();
    if let Value::Object(map) = record {
        for (key, value) in map {
            collect(value, key.clone(), 0, max_depth, &mut paths);
        }
    }
    paths.sort();
    paths
}

fn collect(value: &Value, path: String, depth: usize, max_depth: usize, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if depth >= max_depth {
                return;
            }
            for (key, child) in map {
                collect(child, format!("{path}.{key}"), depth + 1, max_depth, out);
            }
        }
        _ => out.push(path),
    }
}
