//! Rendered output tree
//!
//! A small element/text tree with an HTML serializer. Style is kept as a
//! declaration list until serialization so renderers can layer author
//! declarations over their base style.

use vitrine_style::Declarations;

/// Elements without a closing tag
const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

/// Elements whose text content is written unescaped
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// Rendered node
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedNode {
    Element(Element),
    Text(String),
}

impl RenderedNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// First element in document order carrying `name="value"`
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element> {
        let element = self.as_element()?;
        if element.attr(name) == Some(value) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find_by_attr(name, value))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    fn write_html(&self, out: &mut String, raw: bool) {
        match self {
            Self::Text(text) if raw => out.push_str(text),
            Self::Text(text) => escape_text(text, out),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for RenderedNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Serialize a list of sibling nodes.
pub fn to_html(nodes: &[RenderedNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out, false);
    }
    out
}

/// Rendered element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub style: Declarations,
    pub children: Vec<RenderedNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn with_style(mut self, style: Declarations) -> Self {
        self.style = style;
        self
    }

    pub fn with_child(mut self, child: impl Into<RenderedNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RenderedNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(RenderedNode::text(text))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            write_attr(out, name, value);
        }
        if !self.style.is_empty() {
            write_attr(out, "style", &self.style.to_css());
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        let raw = RAW_TEXT_ELEMENTS.contains(&self.tag.as_str());
        for child in &self.children {
            child.write_html(out, raw);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr(value, out);
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_html() {
        let node: RenderedNode = Element::new("div")
            .with_attr("data-node-id", "a\"b")
            .with_style(Declarations::new().with("padding", "4px"))
            .with_text("1 < 2 & 3")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<div data-node-id="a&quot;b" style="padding: 4px">1 &lt; 2 &amp; 3</div>"#
        );
    }

    #[test]
    fn test_void_element() {
        let node: RenderedNode = Element::new("img").with_attr("src", "x.png").into();
        assert_eq!(node.to_html(), r#"<img src="x.png">"#);
    }

    #[test]
    fn test_style_content_is_raw() {
        let node: RenderedNode = Element::new("style").with_text("a > b { }").into();
        assert_eq!(node.to_html(), "<style>a > b { }</style>");
    }

    #[test]
    fn test_attr_replaced() {
        let element = Element::new("a").with_attr("href", "#").with_attr("href", "/x");
        assert_eq!(element.attrs.len(), 1);
        assert_eq!(element.attr("href"), Some("/x"));
    }

    #[test]
    fn test_text_content_and_find() {
        let tree: RenderedNode = Element::new("div")
            .with_child(Element::new("p").with_attr("data-node-id", "t").with_text("a"))
            .with_text("b")
            .into();
        assert_eq!(tree.text_content(), "ab");
        assert_eq!(tree.find_by_attr("data-node-id", "t").map(|e| e.tag.as_str()), Some("p"));
        assert!(tree.find_by_attr("data-node-id", "zz").is_none());
    }
}
