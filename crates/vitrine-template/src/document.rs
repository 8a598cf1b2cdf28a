//! Template documents
//!
//! Serialized form, one entry per node id:
//!
//! ```json
//! {
//!   "card": { "typeName": "Box", "properties": { "padding": 8 }, "childIds": ["title"] },
//!   "title": { "typeName": "Text", "properties": { "field": "name" } }
//! }
//! ```
//!
//! The editor's native names are accepted too: `type` (a string or
//! `{ "resolvedName": .. }`), `props`, `nodes` and `linkedNodes`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One authored component instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    /// Stable identifier; taken from the document key
    #[serde(skip)]
    pub id: String,
    #[serde(default, alias = "type", deserialize_with = "deserialize_type_name")]
    pub type_name: String,
    #[serde(default, alias = "props")]
    pub properties: Map<String, Value>,
    #[serde(default, alias = "nodes")]
    pub child_ids: Vec<String>,
    /// Slots outside the primary child list
    #[serde(default, alias = "linkedNodes", skip_serializing_if = "BTreeMap::is_empty")]
    pub named_slot_ids: BTreeMap<String, String>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn with_children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.child_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slot(mut self, name: &str, id: impl Into<String>) -> Self {
        self.named_slot_ids.insert(name.to_string(), id.into());
        self
    }

    /// String property, `None` when absent or not a string
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRef {
    Name(String),
    Resolved {
        #[serde(rename = "resolvedName", default)]
        resolved_name: Option<String>,
    },
}

fn deserialize_type_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match TypeRef::deserialize(deserializer)? {
        TypeRef::Name(name) => name,
        // Unresolvable types render as nothing
        TypeRef::Resolved { resolved_name } => resolved_name.unwrap_or_default(),
    })
}

/// Document error
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document must be an object keyed by node id")]
    NotAnObject,
}

/// All node descriptors of a page, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDocument {
    nodes: HashMap<String, NodeDescriptor>,
}

impl TemplateDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Value::Object(entries) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let mut document = Self::new();
        for (id, entry) in entries {
            let mut node: NodeDescriptor = serde_json::from_value(entry)?;
            node.id = id;
            document.insert(node);
        }
        tracing::debug!(nodes = document.len(), "document loaded");
        Ok(document)
    }

    /// Serialize back to the keyed JSON form.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let ordered: BTreeMap<&str, &NodeDescriptor> = self.nodes.iter().map(|(k, v)| (k.as_str(), v)).collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    pub fn insert(&mut self, node: NodeDescriptor) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, node: NodeDescriptor) -> Self {
        self.insert(node);
        self
    }

    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root set for instancing the subtree anchored at `anchor_id`: its
    /// children followed by its named slots. Empty when the anchor is absent.
    pub fn anchored_roots(&self, anchor_id: &str) -> Vec<String> {
        let Some(anchor) = self.get(anchor_id) else {
            return Vec::new();
        };
        anchor
            .child_ids
            .iter()
            .chain(anchor.named_slot_ids.values())
            .cloned()
            .collect()
    }
}
