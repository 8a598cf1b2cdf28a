//! Record normalization
//!
//! Catalog endpoints disagree on where they keep the basics. Normalization
//! fills a fixed set of canonical fields from the common alternatives so
//! templates can bind to `name`, `price` or `image.urls.small.url`
//! regardless of the source. Keys present in the raw item always win.

use serde_json::{json, Map, Number, Value};
use vitrine_path::{resolve, resolve_text};

const ID_PATHS: &[&str] = &["product_variation_id", "id"];
const NAME_PATHS: &[&str] = &["name", "product_variation.name", "attributes.name", "title"];
const DESCRIPTION_PATHS: &[&str] = &["description", "product_variation.description", "attributes.description"];
const PRICE_PATHS: &[&str] = &["price", "product_variation.price", "attributes.price"];
const BRAND_PATHS: &[&str] = &["brand", "product_variation.brand"];
const SLUG_PATHS: &[&str] = &["slug", "product_variation.slug"];
const IMAGE_CANDIDATES: &[&str] = &["images[0]", "image_url", "product_variation.image"];
const IMAGE_URL_PATHS: &[&str] = &["url", "urls.small.url", "urls.original.url"];

/// Normalize one raw list item. Non-object items pass through unchanged.
pub fn normalize_record(raw: Value) -> Value {
    let Value::Object(raw_map) = raw else {
        return raw;
    };
    let source = Value::Object(raw_map);

    let mut record = Map::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            record.insert(key.to_string(), value);
        }
    };

    put("product_variation_id", first_number(&source, ID_PATHS));
    put("name", first_text(&source, NAME_PATHS));
    put("description", first_text(&source, DESCRIPTION_PATHS));
    put("price", first_number(&source, PRICE_PATHS));
    put("image", resolve(&source, "image").cloned().or_else(|| derive_image(&source)));
    put("brand", BRAND_PATHS.iter().find_map(|p| resolve(&source, p)).cloned());
    put("slug", first_text(&source, SLUG_PATHS));

    if let Value::Object(raw_map) = source {
        for (key, value) in raw_map {
            record.insert(key, value);
        }
    }

    Value::Object(record)
}

/// Record bound to the authoring template cell before any data arrives.
pub fn sample_record() -> Value {
    json!({
        "name": "Product name",
        "description": "Sample product description.",
        "price": 999,
        "image": {
            "urls": {
                "small": { "url": "https://placehold.co/300x300?text=Photo" },
                "original": { "url": "https://placehold.co/600x600?text=Photo" }
            }
        },
        "brand": { "name": "Brand" },
        "slug": "product-slug"
    })
}

fn first_text(source: &Value, paths: &[&str]) -> Option<Value> {
    paths
        .iter()
        .find_map(|p| resolve_text(source, p))
        .map(Value::String)
}

fn first_number(source: &Value, paths: &[&str]) -> Option<Value> {
    let value = paths.iter().find_map(|p| resolve(source, p))?;
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => parse_number(s.trim()).map(Value::Number),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn derive_image(source: &Value) -> Option<Value> {
    let candidate = IMAGE_CANDIDATES.iter().find_map(|p| resolve(source, p))?;
    let url = match candidate {
        Value::String(url) => Some(url.clone()),
        Value::Object(_) => IMAGE_URL_PATHS.iter().find_map(|p| resolve_text(candidate, p)),
        _ => None,
    }?;
    Some(json!({ "urls": { "small": { "url": url }, "original": { "url": url } } }))
}
