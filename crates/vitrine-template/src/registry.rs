//! Component registry

use std::collections::HashMap;

use serde_json::Value;

use crate::components;
use crate::document::NodeDescriptor;
use crate::node::RenderedNode;

/// Data a template instance is bound to
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    record: Option<&'a Value>,
}

impl<'a> RenderContext<'a> {
    /// Context with no bound record; field bindings fall back to static values
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn bound(record: &'a Value) -> Self {
        Self { record: Some(record) }
    }

    pub fn record(&self) -> Option<&'a Value> {
        self.record
    }

    /// Text of the value at `path` in the bound record
    pub fn field_text(&self, path: &str) -> Option<String> {
        vitrine_path::resolve_text(self.record?, path.trim())
    }
}

/// Produces the output for one node type
pub trait NodeRenderer {
    /// `children` are the already rendered primary children, in order.
    fn render(&self, node: &NodeDescriptor, children: Vec<RenderedNode>, context: &RenderContext<'_>) -> RenderedNode;
}

impl<F> NodeRenderer for F
where
    F: Fn(&NodeDescriptor, Vec<RenderedNode>, &RenderContext<'_>) -> RenderedNode,
{
    fn render(&self, node: &NodeDescriptor, children: Vec<RenderedNode>, context: &RenderContext<'_>) -> RenderedNode {
        self(node, children, context)
    }
}

/// Type name to renderer mapping
#[derive(Default)]
pub struct Registry {
    renderers: HashMap<String, Box<dyn NodeRenderer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `Box`, `Text`, `Link` and `Image` components
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Box", components::render_box);
        registry.register("Text", components::render_text);
        registry.register("Link", components::render_link);
        registry.register("Image", components::render_image);
        registry
    }

    /// Register `renderer` for `type_name`, replacing any previous one.
    pub fn register(&mut self, type_name: impl Into<String>, renderer: impl NodeRenderer + 'static) -> &mut Self {
        self.renderers.insert(type_name.into(), Box::new(renderer));
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&dyn NodeRenderer> {
        self.renderers.get(type_name).map(|r| r.as_ref())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.renderers.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("types", &names).finish()
    }
}
