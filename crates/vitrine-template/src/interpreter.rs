//! Template instancing
//!
//! Walks a node graph from a root set, building each node's output from
//! its already rendered children. Missing ids, unknown types and reference
//! cycles render as nothing so sibling content is never lost.

use std::collections::HashSet;

use vitrine_style::CompiledStyle;

use crate::components::{CUSTOM_CSS_PROPERTY, STYLED_TYPES};
use crate::document::{NodeDescriptor, TemplateDocument};
use crate::node::RenderedNode;
use crate::registry::{Registry, RenderContext};

/// Document paired with the registry that renders its node types
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer<'a> {
    document: &'a TemplateDocument,
    registry: &'a Registry,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(document: &'a TemplateDocument, registry: &'a Registry) -> Self {
        Self { document, registry }
    }

    /// Render one instance of the subtree rooted at `root_ids`.
    pub fn render(&self, root_ids: &[String], context: &RenderContext<'_>) -> Vec<RenderedNode> {
        let mut ancestors = Vec::new();
        root_ids
            .iter()
            .filter_map(|id| self.render_one(id, context, &mut ancestors))
            .collect()
    }

    fn render_one<'d>(&self, id: &'d str, context: &RenderContext<'_>, ancestors: &mut Vec<&'d str>) -> Option<RenderedNode>
    where
        'a: 'd,
    {
        let node = self.lookup(id, ancestors)?;

        ancestors.push(id);
        let children = node
            .child_ids
            .iter()
            .filter_map(|child| self.render_one(child, context, ancestors))
            .collect();
        ancestors.pop();

        let renderer = self.registry.get(&node.type_name)?;
        Some(renderer.render(node, children, context))
    }

    /// Descriptor for `id` if it is present, renderable and not its own ancestor
    fn lookup(&self, id: &str, ancestors: &[&str]) -> Option<&'a NodeDescriptor> {
        let Some(node) = self.document.get(id) else {
            tracing::debug!(id, "skipping missing node");
            return None;
        };
        if !self.registry.contains(&node.type_name) {
            tracing::warn!(id, type_name = %node.type_name, "skipping node of unknown type");
            return None;
        }
        if ancestors.contains(&id) {
            tracing::warn!(id, "skipping node that contains itself");
            return None;
        }
        Some(node)
    }

    /// Scoped conditional styles of every renderable node under `root_ids`.
    ///
    /// Compiled once per node definition, so the result is shared by every
    /// instance rendered from the same roots.
    pub fn stylesheet(&self, root_ids: &[String]) -> String {
        let mut seen = HashSet::new();
        let mut fragments = Vec::new();
        let mut ancestors = Vec::new();
        for id in root_ids {
            self.collect_styles(id, &mut ancestors, &mut seen, &mut fragments);
        }
        fragments.join("\n")
    }

    fn collect_styles<'d>(&self, id: &'d str, ancestors: &mut Vec<&'d str>, seen: &mut HashSet<&'d str>, out: &mut Vec<String>)
    where
        'a: 'd,
    {
        let Some(node) = self.lookup(id, ancestors) else {
            return;
        };

        if seen.insert(id) && STYLED_TYPES.contains(&node.type_name.as_str()) {
            if let Some(text) = node.str_prop(CUSTOM_CSS_PROPERTY) {
                let compiled = CompiledStyle::compile(&node.id, text);
                if !compiled.stylesheet.is_empty() {
                    out.push(compiled.stylesheet);
                }
            }
        }

        ancestors.push(id);
        for child in &node.child_ids {
            self.collect_styles(child, ancestors, seen, out);
        }
        ancestors.pop();
    }
}

/// Render one instance of the subtree rooted at `root_ids` with `context` bound.
pub fn render(root_ids: &[String], document: &TemplateDocument, registry: &Registry, context: &RenderContext<'_>) -> Vec<RenderedNode> {
    TemplateRenderer::new(document, registry).render(root_ids, context)
}

/// Scoped stylesheet for the subtree rooted at `root_ids`, using the built-in components.
pub fn collect_stylesheet(document: &TemplateDocument, root_ids: &[String]) -> String {
    let registry = Registry::with_builtins();
    TemplateRenderer::new(document, &registry).stylesheet(root_ids)
}
