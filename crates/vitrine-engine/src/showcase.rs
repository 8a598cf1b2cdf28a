//! Showcase grid
//!
//! Repeats the template anchored at the showcase node once per record. In
//! authoring mode the first cell is the editable template, bound to the
//! first record or a sample, followed by previews of the first page.

use serde_json::Value;
use vitrine_source::{sample_record, EditorMode, ListSourceState};
use vitrine_style::{Declarations, NODE_ID_ATTRIBUTE};
use vitrine_template::{Element, Registry, RenderContext, RenderedNode, TemplateDocument, TemplateRenderer};

use crate::config::ShowcaseConfig;

/// Attribute marking the element whose visibility requests the next page
pub const SENTINEL_ATTRIBUTE: &str = "data-sentinel";

const LOADING_TEXT: &str = "Loading items...";
const LOADING_MORE_TEXT: &str = "Loading...";
const EMPTY_TEXT: &str = "No data";
const NO_ENDPOINT_TEXT: &str = "Set the list endpoint in the showcase settings";
const EMPTY_TEMPLATE_TEXT: &str = "Add elements to the first cell to see them here";
const TEMPLATE_LABEL: &str = "Template: drop elements here";

/// Template anchored at a showcase node, ready to be replayed per record
#[derive(Debug)]
pub struct Showcase<'a> {
    anchor_id: String,
    config: ShowcaseConfig,
    renderer: TemplateRenderer<'a>,
    root_ids: Vec<String>,
}

impl<'a> Showcase<'a> {
    pub fn new(document: &'a TemplateDocument, registry: &'a Registry, anchor_id: impl Into<String>, config: ShowcaseConfig) -> Self {
        let anchor_id = anchor_id.into();
        let root_ids = document.anchored_roots(&anchor_id);
        tracing::debug!(anchor = %anchor_id, roots = root_ids.len(), "showcase template");
        Self {
            anchor_id,
            config,
            renderer: TemplateRenderer::new(document, registry),
            root_ids,
        }
    }

    /// Showcase configured from the anchor node's own properties
    pub fn from_anchor(document: &'a TemplateDocument, registry: &'a Registry, anchor_id: &str) -> Self {
        let config = document.get(anchor_id).map(ShowcaseConfig::from_node).unwrap_or_default();
        Self::new(document, registry, anchor_id, config)
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn root_ids(&self) -> &[String] {
        &self.root_ids
    }

    /// Scoped conditional styles of the template, shared by every card
    pub fn stylesheet(&self) -> String {
        self.renderer.stylesheet(&self.root_ids)
    }

    /// One template instance bound to `record`
    pub fn render_card(&self, record: &Value) -> Vec<RenderedNode> {
        self.renderer.render(&self.root_ids, &RenderContext::bound(record))
    }

    /// Grid markup for the current list state.
    pub fn render(&self, state: &ListSourceState, mode: EditorMode) -> RenderedNode {
        let mut cells = Vec::new();

        if state.loading {
            cells.push(message(LOADING_TEXT, "#666"));
        }
        if let Some(error) = &state.error {
            cells.push(message(error, "#c00"));
        }

        let settled = !state.loading && state.error.is_none();
        if settled && state.items.is_empty() {
            let text = if self.config.source.endpoint().is_some() { EMPTY_TEXT } else { NO_ENDPOINT_TEXT };
            cells.push(message(text, "#888"));
        }

        match mode {
            EditorMode::Authoring if settled => self.authoring_cells(state, &mut cells),
            EditorMode::Live if settled && !state.items.is_empty() && !self.root_ids.is_empty() => {
                self.live_cells(state, &mut cells)
            }
            _ => {}
        }

        Element::new("div")
            .with_attr(NODE_ID_ATTRIBUTE, self.anchor_id.clone())
            .with_style(
                Declarations::new()
                    .with("display", "grid")
                    .with("grid-template-columns", format!("repeat({}, 1fr)", self.config.columns()))
                    .with("gap", "16px")
                    .with("padding", "16px")
                    .with("min-height", "120px")
                    .with("border-radius", "8px"),
            )
            .with_children(cells)
            .into()
    }

    fn live_cells(&self, state: &ListSourceState, cells: &mut Vec<RenderedNode>) {
        for record in &state.items {
            cells.push(card().with_children(self.render_card(record)).into());
        }

        if state.loading_more {
            cells.push(
                full_row()
                    .with_style(
                        full_row_style()
                            .with("padding", "16px")
                            .with("text-align", "center")
                            .with("color", "#888")
                            .with("font-size", "13px"),
                    )
                    .with_text(LOADING_MORE_TEXT)
                    .into(),
            );
        }

        if self.config.source.infinite_scroll && state.has_more && !state.loading_more {
            cells.push(
                full_row()
                    .with_attr(SENTINEL_ATTRIBUTE, "true")
                    .with_attr("aria-hidden", "true")
                    .with_style(full_row_style().with("height", "1px").with("visibility", "hidden"))
                    .into(),
            );
        }
    }

    fn authoring_cells(&self, state: &ListSourceState, cells: &mut Vec<RenderedNode>) {
        let previews: Vec<&Value> = state.items.iter().take(self.config.source.page_size()).collect();

        cells.push(
            full_row()
                .with_style(full_row_style().with("font-size", "11px").with("color", "#2563eb").with("margin-bottom", "4px"))
                .with_text(format!(
                    "Authoring: the first cell is the template. Showing the first page ({} items); the live page shows every item.",
                    previews.len()
                ))
                .into(),
        );

        let sample = sample_record();
        let template_record = state.items.first().unwrap_or(&sample);
        cells.push(authoring_cell(TEMPLATE_LABEL, "#e0f2fe", self.render_card(template_record)));

        for (index, record) in previews.into_iter().enumerate() {
            let body = if self.root_ids.is_empty() {
                vec![Element::new("div")
                    .with_style(Declarations::new().with("font-size", "11px").with("color", "#aaa").with("padding", "8px"))
                    .with_text(EMPTY_TEMPLATE_TEXT)
                    .into()]
            } else {
                self.render_card(record)
            };
            cells.push(authoring_cell(&format!("Item {}", index + 1), "#f5f5f5", body));
        }
    }
}

fn card() -> Element {
    Element::new("div").with_style(
        Declarations::new()
            .with("border", "1px solid #eee")
            .with("border-radius", "8px")
            .with("overflow", "hidden")
            .with("background", "#fff")
            .with("display", "flex")
            .with("flex-direction", "column")
            .with("min-height", "120px"),
    )
}

fn authoring_cell(label: &str, badge: &str, body: Vec<RenderedNode>) -> RenderedNode {
    let mut cell = card();
    cell.style.insert("position", "relative");
    cell.with_child(
        Element::new("div")
            .with_style(
                Declarations::new()
                    .with("position", "absolute")
                    .with("top", "4px")
                    .with("left", "4px")
                    .with("font-size", "10px")
                    .with("color", "#888")
                    .with("background", badge)
                    .with("padding", "2px 6px")
                    .with("border-radius", "4px")
                    .with("z-index", "1"),
            )
            .with_text(label),
    )
    .with_child(
        Element::new("div")
            .with_style(Declarations::new().with("padding-top", "24px").with("flex", "1").with("min-height", "80px"))
            .with_children(body),
    )
    .into()
}

fn full_row() -> Element {
    Element::new("div")
}

fn full_row_style() -> Declarations {
    Declarations::new().with("grid-column", "1 / -1")
}

fn message(text: &str, color: &str) -> RenderedNode {
    full_row()
        .with_style(full_row_style().with("padding", "24px").with("text-align", "center").with("color", color))
        .with_text(text)
        .into()
}
