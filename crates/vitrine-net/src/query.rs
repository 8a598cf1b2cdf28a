//! Endpoint URL handling

use crate::NetError;
use url::{form_urlencoded, Url};

/// Parse an authored endpoint. Surrounding whitespace is ignored.
pub fn parse_endpoint(text: &str) -> Result<Url, NetError> {
    let trimmed = text.trim();
    Url::parse(trimmed).map_err(|e| NetError::InvalidUrl(format!("{trimmed}: {e}")))
}

/// Return `url` with query parameter `name` set to `value`.
///
/// The first existing parameter with that name is replaced in place and any
/// duplicates are removed; otherwise the parameter is appended. Every other
/// segment of the query is kept byte for byte.
pub fn with_query_param(url: &Url, name: &str, value: &str) -> Url {
    let assignment = form_urlencoded::Serializer::new(String::new()).append_pair(name, value).finish();
    let mut segments = Vec::new();
    let mut replaced = false;

    for segment in url.query().unwrap_or_default().split('&') {
        let key = form_urlencoded::parse(segment.as_bytes()).next().map(|(key, _)| key);
        match key {
            Some(key) if key == name => {
                if !replaced {
                    segments.push(assignment.as_str());
                    replaced = true;
                }
            }
            _ if segment.is_empty() => {}
            _ => segments.push(segment),
        }
    }
    if !replaced {
        segments.push(assignment.as_str());
    }

    let mut out = url.clone();
    out.set_query(Some(&segments.join("&")));
    out
}
