//! Conditional block scanner
//!
//! Small hand-written scanner over style text. It recognizes one level of
//! `@media (condition) { ... }` blocks and leaves everything else as inline
//! text. Brace depth is counted so nested braces inside a body stay in the
//! body.

use crate::ConditionalBlock;

/// Literal that opens a conditional block
pub const BLOCK_MARKER: &str = "@media";

/// Outcome of scanning one block starting right after the marker
enum Scan<'a> {
    Block {
        condition: &'a str,
        body: &'a str,
        end: usize,
    },
    Malformed {
        resume: usize,
    },
}

/// Split style text into whitespace-normalized inline text and the
/// conditional blocks it contains.
///
/// A malformed block is dropped whole, body included, so none of its
/// declarations leak into the inline text. Scanning resumes after the
/// dropped body, or at the next marker when the body never closes.
pub fn split_media_queries(text: &str) -> (String, Vec<ConditionalBlock>) {
    let mut blocks = Vec::new();
    let mut inline_parts: Vec<&str> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(found) = text[pos..].find(BLOCK_MARKER) else {
            inline_parts.push(&text[pos..]);
            break;
        };
        let start = pos + found;
        inline_parts.push(&text[pos..start]);

        match scan_block(text, start + BLOCK_MARKER.len()) {
            Scan::Block { condition, body, end } => {
                blocks.push(ConditionalBlock {
                    condition: condition.trim().to_string(),
                    declarations: body.trim().to_string(),
                });
                pos = end;
            }
            Scan::Malformed { resume } => {
                tracing::warn!(offset = start, "dropping malformed conditional block");
                pos = resume;
            }
        }
    }

    let inline = inline_parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    (inline, blocks)
}

fn scan_block(text: &str, from: usize) -> Scan<'_> {
    let bytes = text.as_bytes();
    let first_brace = find_byte(bytes, from, b'{');

    let open_paren = match find_byte(bytes, from, b'(') {
        // A body opening before any condition means there is no condition
        Some(open) if first_brace.is_none_or(|brace| open < brace) => open,
        _ => {
            let resume = first_brace.map_or(from, |brace| skip_body(text, brace));
            return Scan::Malformed { resume };
        }
    };

    // The condition must close before the body opens
    let body_brace = find_byte(bytes, open_paren, b'{');
    let close_paren = find_closing(bytes, open_paren, b'(', b')').filter(|&close| body_brace.is_none_or(|brace| close < brace));
    let Some(close_paren) = close_paren else {
        let resume = match body_brace {
            Some(brace) => skip_body(text, brace),
            None => next_marker(text, open_paren + 1),
        };
        return Scan::Malformed { resume };
    };

    let Some(open_brace) = body_brace else {
        return Scan::Malformed { resume: close_paren + 1 };
    };
    let Some(close_brace) = find_closing(bytes, open_brace, b'{', b'}') else {
        return Scan::Malformed { resume: next_marker(text, open_brace + 1) };
    };

    Scan::Block {
        condition: &text[open_paren..=close_paren],
        body: &text[open_brace + 1..close_brace],
        end: close_brace + 1,
    }
}

/// Position just past a dropped body opening at `open_brace`. An unclosed
/// body swallows everything up to the next marker.
fn skip_body(text: &str, open_brace: usize) -> usize {
    match find_closing(text.as_bytes(), open_brace, b'{', b'}') {
        Some(close) => close + 1,
        None => next_marker(text, open_brace + 1),
    }
}

fn next_marker(text: &str, from: usize) -> usize {
    text.get(from..)
        .and_then(|rest| rest.find(BLOCK_MARKER))
        .map_or(text.len(), |i| from + i)
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

/// Index of the delimiter closing the one at `open`, counting nesting.
fn find_closing(bytes: &[u8], open: usize, opener: u8, closer: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == opener {
            depth += 1;
        } else if b == closer {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}
