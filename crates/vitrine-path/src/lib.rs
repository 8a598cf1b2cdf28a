//! Vitrine Field Paths
//!
//! Dotted/bracketed addressing into JSON records.
//!
//! Grammar: `segment ('.' segment)*` where a segment is either a plain key
//! or `key[index]`. Paths are parsed on every resolution; nothing is cached.
//!
//! ```
//! use serde_json::json;
//!
//! let record = json!({ "image": { "urls": { "small": { "url": "a.png" } } } });
//! assert_eq!(vitrine_path::resolve_text(&record, "image.urls.small.url").as_deref(), Some("a.png"));
//! ```

mod leaves;
mod segment;

pub use leaves::{enumerate_leaf_paths, DEFAULT_LEAF_DEPTH};
pub use segment::Segment;

use serde_json::Value;

/// Resolve `path` against `record`.
///
/// Returns `None` for an empty path, for any segment applied to a scalar or
/// null, and for a final `null`. Never panics.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = record;
    for raw in path.split('.') {
        current = step(current, Segment::parse(raw))?;
    }

    if current.is_null() { None } else { Some(current) }
}

/// Resolve `path` and render the result as display text.
///
/// Strings come back verbatim, other values use their JSON form.
pub fn resolve_text(record: &Value, path: &str) -> Option<String> {
    resolve(record, path).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn step<'a>(value: &'a Value, segment: Segment<'_>) -> Option<&'a Value> {
    match segment {
        Segment::Key(key) => lookup(value, key),
        Segment::Indexed { key, index, raw_index } => {
            let inner = lookup(value, key)?;
            match inner {
                Value::Array(items) => items.get(index),
                // Not list-like: fall back to a property named by the index text
                Value::Object(map) => map.get(raw_index),
                _ => None,
            }
        }
    }
}

fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_plain_key() {
        let record = json!({ "name": "Lamp" });
        assert_eq!(resolve(&record, "name"), Some(&json!("Lamp")));
    }

    #[test]
    fn test_resolve_indexed_into_array() {
        let record = json!({ "variations": [{ "sku": "a" }, { "sku": "b" }] });
        assert_eq!(resolve_text(&record, "variations[1].sku").as_deref(), Some("b"));
        assert_eq!(resolve(&record, "variations[5].sku"), None);
    }

    #[test]
    fn test_resolve_indexed_falls_back_to_property() {
        let record = json!({ "sizes": { "0": "small" } });
        assert_eq!(resolve_text(&record, "sizes[0]").as_deref(), Some("small"));
    }

    #[test]
    fn test_resolve_through_scalar_is_none() {
        let record = json!({ "price": 10, "tags": "x" });
        assert_eq!(resolve(&record, "price.amount"), None);
        assert_eq!(resolve(&record, "tags[0]"), None);
    }

    #[test]
    fn test_resolve_null_is_none() {
        let record = json!({ "brand": null });
        assert_eq!(resolve(&record, "brand"), None);
        assert_eq!(resolve(&record, "brand.name"), None);
    }

    #[test]
    fn test_resolve_empty_path() {
        assert_eq!(resolve(&json!({ "": 1 }), ""), None);
    }

    #[test]
    fn test_resolve_text_numbers() {
        let record = json!({ "price": 999, "stock": 1.5, "sale": true });
        assert_eq!(resolve_text(&record, "price").as_deref(), Some("999"));
        assert_eq!(resolve_text(&record, "stock").as_deref(), Some("1.5"));
        assert_eq!(resolve_text(&record, "sale").as_deref(), Some("true"));
    }
}
