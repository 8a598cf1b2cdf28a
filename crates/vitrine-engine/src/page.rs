//! Standalone page output

use vitrine_net::Transport;
use vitrine_source::{EditorMode, ListSource};
use vitrine_template::{to_html, Element, RenderedNode};

use crate::showcase::Showcase;
use crate::viewport::Viewport;

/// Run the initial load, then request up to `pages - 1` further pages.
///
/// Stops early once a page fails, comes back short or adds nothing.
pub async fn load_pages<T: Transport>(source: &ListSource<T>, pages: usize, mode: EditorMode) {
    source.load().await;

    for _ in 1..pages {
        if source.state().error.is_some() || !source.state().has_more {
            break;
        }
        let before = source.state().items.len();
        source.load_more(mode).await;
        if source.state().items.len() == before {
            break;
        }
    }

    let state = source.state();
    tracing::info!(items = state.items.len(), has_more = state.has_more, "pages loaded");
}

/// Complete HTML document for the showcase on a preview canvas.
pub fn render_page(showcase: &Showcase<'_>, grid: RenderedNode, viewport: Viewport) -> String {
    let stylesheet = showcase.stylesheet();
    let head = Element::new("head")
        .with_child(Element::new("meta").with_attr("charset", "utf-8"))
        .with_child(Element::new("title").with_text("Vitrine"))
        .with_child(Element::new("style").with_text(stylesheet));
    let body = Element::new("body").with_child(viewport.canvas([grid]));
    let html = Element::new("html").with_child(head).with_child(body);

    format!("<!DOCTYPE html>{}", to_html(&[html.into()]))
}
