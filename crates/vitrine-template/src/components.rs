//! Built-in components
//!
//! Property names and defaults follow the editor's settings panels. Numeric
//! lengths are pixels; string lengths are used verbatim.

use serde_json::Value;
use vitrine_style::{CompiledStyle, Declarations, NODE_ID_ATTRIBUTE};

use crate::document::NodeDescriptor;
use crate::node::{Element, RenderedNode};
use crate::registry::RenderContext;

/// Property holding a field path for the primary bound value
pub const FIELD_PROPERTY: &str = "field";

/// Older name of [`FIELD_PROPERTY`]
pub const LEGACY_FIELD_PROPERTY: &str = "productField";

/// Property holding a field path for a link target
pub const HREF_FIELD_PROPERTY: &str = "hrefField";

/// Property holding author style text
pub const CUSTOM_CSS_PROPERTY: &str = "customCss";

/// Node types whose renderers apply [`CUSTOM_CSS_PROPERTY`]
pub const STYLED_TYPES: &[&str] = &["Box", "Link"];

const PLACEHOLDER_TEXT: &str = "Image: choose a field in settings";

/// Container `<div>` laying out its children with flexbox
pub fn render_box(node: &NodeDescriptor, children: Vec<RenderedNode>, _: &RenderContext<'_>) -> RenderedNode {
    let border_style = str_or(node, "borderStyle", "dashed");
    let border = if border_style == "none" {
        "none".to_string()
    } else {
        format!(
            "{} {} {}",
            length_or(node, "borderWidth", "1px"),
            border_style,
            str_or(node, "borderColor", "#ccc")
        )
    };

    let style = Declarations::new()
        .with("min-height", "200px")
        .with("padding", length_or(node, "padding", "16px"))
        .with("margin", length_or(node, "margin", "0px"))
        .with("border", border)
        .with("border-radius", "4px")
        .with("display", "flex")
        .with("flex-direction", str_or(node, "flexDirection", "column"))
        .with("align-items", str_or(node, "alignItems", "stretch"))
        .with("justify-content", str_or(node, "justifyContent", "flex-start"))
        .with("gap", length_or(node, "gap", "8px"));

    Element::new("div")
        .with_attr(NODE_ID_ATTRIBUTE, node.id.clone())
        .with_style(with_custom_css(node, style))
        .with_children(children)
        .into()
}

/// Paragraph, optionally bound to a record field
pub fn render_text(node: &NodeDescriptor, _: Vec<RenderedNode>, context: &RenderContext<'_>) -> RenderedNode {
    let content = bound_value(node, context, &[FIELD_PROPERTY, LEGACY_FIELD_PROPERTY])
        .unwrap_or_else(|| str_or(node, "content", "Text").to_string());

    let style = Declarations::new()
        .with("margin", "0 0 8px 0")
        .with("font-size", length_or(node, "fontSize", "14px"))
        .with("font-weight", plain_or(node, "fontWeight", "normal"))
        .with("color", str_or(node, "color", "#000000"))
        .with("text-align", str_or(node, "textAlign", "left"));

    Element::new("p")
        .with_attr(NODE_ID_ATTRIBUTE, node.id.clone())
        .with_style(style)
        .with_text(content)
        .into()
}

/// Anchor with optional bindings for its text and target
pub fn render_link(node: &NodeDescriptor, _: Vec<RenderedNode>, context: &RenderContext<'_>) -> RenderedNode {
    let content = bound_value(node, context, &[FIELD_PROPERTY, LEGACY_FIELD_PROPERTY])
        .unwrap_or_else(|| str_or(node, "content", "Link").to_string());
    let href = bound_value(node, context, &[HREF_FIELD_PROPERTY]).unwrap_or_else(|| str_or(node, "href", "#").to_string());
    let target = str_or(node, "target", "_self");

    let style = Declarations::new()
        .with("margin", "0")
        .with("font-size", length_or(node, "fontSize", "14px"))
        .with("font-weight", plain_or(node, "fontWeight", "normal"))
        .with("color", str_or(node, "color", "#2563eb"))
        .with("text-align", str_or(node, "textAlign", "left"))
        .with("text-decoration", str_or(node, "textDecoration", "underline"))
        .with("font-style", str_or(node, "fontStyle", "normal"))
        .with("cursor", "pointer");

    let mut anchor = Element::new("a")
        .with_attr("href", href)
        .with_attr("target", target)
        .with_attr(NODE_ID_ATTRIBUTE, node.id.clone());
    if target == "_blank" {
        anchor = anchor.with_attr("rel", "noopener noreferrer");
    }

    anchor.with_style(with_custom_css(node, style)).with_text(content).into()
}

/// Image in a sizing wrapper; a placeholder box when no source resolves
pub fn render_image(node: &NodeDescriptor, _: Vec<RenderedNode>, context: &RenderContext<'_>) -> RenderedNode {
    let src = bound_value(node, context, &[FIELD_PROPERTY, LEGACY_FIELD_PROPERTY])
        .unwrap_or_else(|| str_or(node, "src", "").to_string());

    let mut wrapper_style = Declarations::new()
        .with("border-radius", "4px")
        .with("min-width", "120px")
        .with("min-height", "120px")
        .with("max-width", "100%")
        .with("overflow", "hidden");
    if let Some(width) = length(node, "width") {
        wrapper_style.insert("width", width);
    }
    if let Some(height) = length(node, "height") {
        wrapper_style.insert("height", height);
    }

    let content = if src.trim().is_empty() {
        Element::new("div")
            .with_style(
                Declarations::new()
                    .with("display", "flex")
                    .with("align-items", "center")
                    .with("justify-content", "center")
                    .with("background", "#f0f0f0")
                    .with("color", "#888")
                    .with("font-size", "12px")
                    .with("min-width", "120px")
                    .with("min-height", "120px")
                    .with("border-radius", "4px"),
            )
            .with_text(PLACEHOLDER_TEXT)
    } else {
        Element::new("img")
            .with_attr("src", src)
            .with_attr("alt", str_or(node, "alt", ""))
            .with_attr("draggable", "false")
            .with_style(
                Declarations::new()
                    .with("width", "100%")
                    .with("height", "100%")
                    .with("object-fit", str_or(node, "objectFit", "cover"))
                    .with("display", "block"),
            )
    };

    Element::new("div")
        .with_attr(NODE_ID_ATTRIBUTE, node.id.clone())
        .with_style(wrapper_style)
        .with_child(content)
        .into()
}

/// First configured binding that resolves in the bound record
fn bound_value(node: &NodeDescriptor, context: &RenderContext<'_>, properties: &[&str]) -> Option<String> {
    properties
        .iter()
        .filter_map(|key| node.str_prop(key))
        .find(|path| !path.trim().is_empty())
        .and_then(|path| context.field_text(path))
}

fn with_custom_css(node: &NodeDescriptor, mut base: Declarations) -> Declarations {
    if let Some(text) = node.str_prop(CUSTOM_CSS_PROPERTY) {
        base.merge(&CompiledStyle::compile(&node.id, text).inline);
    }
    base
}

fn str_or<'a>(node: &'a NodeDescriptor, key: &str, default: &'a str) -> &'a str {
    node.str_prop(key).unwrap_or(default)
}

fn length(node: &NodeDescriptor, key: &str) -> Option<String> {
    match node.properties.get(key)? {
        Value::Number(n) => Some(format!("{n}px")),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn length_or(node: &NodeDescriptor, key: &str, default: &str) -> String {
    length(node, key).unwrap_or_else(|| default.to_string())
}

/// Unitless value such as a numeric font weight
fn plain_or(node: &NodeDescriptor, key: &str, default: &str) -> String {
    match node.properties.get(key) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}
