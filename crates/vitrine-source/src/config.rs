//! List source configuration

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "limit";

/// Page size used when none is configured
pub const DEFAULT_LIMIT: usize = 30;

/// Pagination parameter used when none (or a blank one) is configured
pub const DEFAULT_OFFSET_PARAM: &str = "offset";

/// Where the consuming surface is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Inside the builder; pagination is disabled
    #[default]
    Authoring,
    /// Published or previewed page
    Live,
}

/// List source configuration, as authored on the showcase node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    /// List endpoint; blank means "not configured"
    #[serde(alias = "apiUrl")]
    pub endpoint: String,
    /// Page size
    pub limit: usize,
    /// Load further pages when the consumer nears the end of the list
    pub infinite_scroll: bool,
    /// Name of the offset query parameter
    #[serde(alias = "infiniteScrollParam")]
    pub offset_param: String,
    /// Explicit path to the list inside the response body
    pub list_path: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            limit: DEFAULT_LIMIT,
            infinite_scroll: false,
            offset_param: DEFAULT_OFFSET_PARAM.to_string(),
            list_path: None,
        }
    }
}

impl SourceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_infinite_scroll(mut self, enabled: bool) -> Self {
        self.infinite_scroll = enabled;
        self
    }

    pub fn with_offset_param(mut self, name: impl Into<String>) -> Self {
        self.offset_param = name.into();
        self
    }

    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = Some(path.into());
        self
    }

    /// Read authored properties one field at a time.
    ///
    /// Unlike deserializing the whole object, a property of the wrong shape
    /// only resets that field to its default; the others still apply.
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        let mut config = Self::default();
        read_property(properties, &["endpoint", "apiUrl"], &mut config.endpoint);
        read_property(properties, &["limit"], &mut config.limit);
        read_property(properties, &["infiniteScroll"], &mut config.infinite_scroll);
        read_property(properties, &["offsetParam", "infiniteScrollParam"], &mut config.offset_param);
        read_property(properties, &["listPath"], &mut config.list_path);
        config
    }

    /// Page size, never zero
    pub fn page_size(&self) -> usize {
        self.limit.max(1)
    }

    /// Offset parameter name, falling back to the default when blank
    pub fn offset_param(&self) -> &str {
        match self.offset_param.trim() {
            "" => DEFAULT_OFFSET_PARAM,
            name => name,
        }
    }

    /// Trimmed endpoint, `None` when blank
    pub fn endpoint(&self) -> Option<&str> {
        match self.endpoint.trim() {
            "" => None,
            endpoint => Some(endpoint),
        }
    }

    /// Configured extraction path, `None` when absent or blank
    pub fn list_path(&self) -> Option<&str> {
        self.list_path.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// Whether switching from `self` to `other` invalidates loaded records.
    pub(crate) fn requires_reload(&self, other: &SourceConfig) -> bool {
        self.endpoint() != other.endpoint()
            || self.page_size() != other.page_size()
            || self.list_path() != other.list_path()
    }
}

/// Overwrite `slot` with the first of `keys` present in `properties`, if it
/// has the right shape.
pub fn read_property<T: DeserializeOwned>(properties: &Map<String, Value>, keys: &[&str], slot: &mut T) {
    let Some((key, value)) = keys.iter().find_map(|&key| properties.get(key).map(|value| (key, value))) else {
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(err) => tracing::warn!(key, %err, "ignoring invalid property"),
    }
}
