//! Showcase configuration

use vitrine_source::{read_property, SourceConfig};
use vitrine_template::NodeDescriptor;

/// Column count used when none is configured
pub const DEFAULT_COLUMNS: u8 = 3;

/// Showcase options, as authored on the showcase node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    /// Grid columns, clamped to 1..=5
    pub columns: u8,
    pub source: SourceConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            source: SourceConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    pub fn with_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn columns(&self) -> u8 {
        self.columns.clamp(1, 5)
    }

    /// Read the configuration from a showcase node's properties.
    ///
    /// A property of the wrong shape is logged and falls back to its own
    /// default without affecting the others.
    pub fn from_node(node: &NodeDescriptor) -> Self {
        tracing::debug!(id = %node.id, "reading showcase properties");
        let mut config = Self::new(SourceConfig::from_properties(&node.properties));
        read_property(&node.properties, &["columns"], &mut config.columns);
        config
    }
}
