//! Vitrine Style Directives
//!
//! Compiles the free-form style text authors attach to container nodes.
//!
//! Style text is a flat list of `property: value;` declarations optionally
//! followed by conditional blocks:
//!
//! ```text
//! padding: 24px; background: #fafafa;
//! @media (max-width: 600px) { padding: 8px; flex-direction: column; }
//! ```
//!
//! The flat part becomes inline declarations. Conditional blocks are
//! compiled into `@container` rules scoped to the owning node, so they
//! react to the width of the builder canvas rather than the browser window.

mod declarations;
mod scanner;
mod scoped;

pub use declarations::{add_priority_escalation, normalize_property_name, parse_inline_declarations, Declarations};
pub use scanner::{split_media_queries, BLOCK_MARKER};
pub use scoped::{compile_scoped_stylesheet, escape_for_embedding, scope_selector, NODE_ID_ATTRIBUTE};

/// Conditional block extracted from style text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalBlock {
    /// Parenthesized condition, e.g. `(max-width: 600px)`
    pub condition: String,
    /// Raw declarations between the braces
    pub declarations: String,
}

/// Style text split into its inline and conditional parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStyle {
    pub inline: Declarations,
    pub blocks: Vec<ConditionalBlock>,
}

impl ParsedStyle {
    /// Parse author style text. Never fails; malformed blocks are dropped.
    pub fn parse(text: &str) -> Self {
        let (inline, blocks) = split_media_queries(text);
        Self {
            inline: parse_inline_declarations(&inline),
            blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.blocks.is_empty()
    }
}

/// Everything a node needs from its style text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledStyle {
    /// Declarations to merge over the node's base style
    pub inline: Declarations,
    /// Scoped sheet, already escaped for embedding in a `<style>` element.
    /// Empty when the text has no conditional blocks.
    pub stylesheet: String,
}

impl CompiledStyle {
    /// Compile `text` for the node identified by `node_id`.
    pub fn compile(node_id: &str, text: &str) -> Self {
        let parsed = ParsedStyle::parse(text);
        let sheet = compile_scoped_stylesheet(node_id, &parsed.blocks);
        let stylesheet = if sheet.is_empty() { sheet } else { escape_for_embedding(&sheet) };

        Self {
            inline: parsed.inline,
            stylesheet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_and_blocks() {
        let parsed = ParsedStyle::parse("color: red; @media (max-width: 600px) { color: blue; }");
        assert_eq!(parsed.inline.get("color"), Some("red"));
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].condition, "(max-width: 600px)");
        assert_eq!(parsed.blocks[0].declarations, "color: blue;");
    }

    #[test]
    fn test_compile_empty() {
        let compiled = CompiledStyle::compile("n1", "");
        assert!(compiled.inline.is_empty());
        assert!(compiled.stylesheet.is_empty());
    }

    #[test]
    fn test_compile_scoped() {
        let compiled = CompiledStyle::compile("n1", "gap: 4px; @media (max-width: 375px) { gap: 0 }");
        assert_eq!(compiled.inline.get("gap"), Some("4px"));
        assert_eq!(
            compiled.stylesheet,
            r#"@container (max-width: 375px) { [data-node-id="n1"] { gap: 0 !important } }"#
        );
    }

    #[test]
    fn test_compile_escapes_markup() {
        let compiled = CompiledStyle::compile("n1", "@media (max-width: 1px) { x: </style><script> }");
        assert!(!compiled.stylesheet.contains('<'));
    }
}
