//! List extraction from response bodies

use serde_json::Value;
use vitrine_path::resolve;

/// Envelope shapes tried in order when no extraction path is configured.
/// The empty path stands for the body itself.
pub const ENVELOPE_PATHS: &[&str] = &["", "data", "data.data", "data.items", "data.list", "data.products"];

/// Pull the list of raw items out of a response body.
///
/// With an explicit `path` the resolved value must be an array, otherwise
/// the result is empty. Without one, the first envelope in
/// [`ENVELOPE_PATHS`] holding a non-empty array wins. Malformed bodies
/// simply yield no items.
pub fn extract_list(body: &Value, path: Option<&str>) -> Vec<Value> {
    if let Some(path) = path {
        return match resolve(body, path) {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                tracing::debug!(path, "configured list path did not resolve to a list");
                Vec::new()
            }
        };
    }

    ENVELOPE_PATHS
        .iter()
        .find_map(|candidate| {
            let value = if candidate.is_empty() { Some(body) } else { resolve(body, candidate) };
            match value {
                Some(Value::Array(items)) if !items.is_empty() => Some(items.clone()),
                _ => None,
            }
        })
        .unwrap_or_default()
}
