//! Scoped sheet compilation

use crate::{add_priority_escalation, ConditionalBlock};

/// Attribute carrying a node's stable identifier in rendered markup
pub const NODE_ID_ATTRIBUTE: &str = "data-node-id";

/// Attribute selector matching the element rendered for `node_id`.
pub fn scope_selector(node_id: &str) -> String {
    let mut escaped = String::with_capacity(node_id.len());
    for c in node_id.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("[{NODE_ID_ATTRIBUTE}=\"{escaped}\"]")
}

/// Compile conditional blocks into container rules scoped to `node_id`.
///
/// Conditions become `@container` queries so they are evaluated against the
/// canvas (declared with `container-type: inline-size`) instead of the
/// browser viewport. Declarations are priority-escalated so they win over
/// the node's own inline base style.
pub fn compile_scoped_stylesheet(node_id: &str, blocks: &[ConditionalBlock]) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let selector = scope_selector(node_id);
    blocks
        .iter()
        .map(|block| {
            format!(
                "@container {} {{ {} {{ {} }} }}",
                block.condition,
                selector,
                add_priority_escalation(&block.declarations)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Make CSS safe to place inside a `<style>` element.
///
/// Every `<` is replaced with the CSS escape `\3C `, so no sequence in the
/// text can close the surrounding element.
pub fn escape_for_embedding(css: &str) -> String {
    css.replace('<', "\\3C ")
}
