//! Showcase rendering driven by a scripted list source

use serde_json::json;
use vitrine_engine::{
    load_pages, render_page, EditorMode, ListSource, ListSourceState, Registry, ScriptedTransport, Showcase, ShowcaseConfig,
    SourceConfig, TemplateDocument, Viewport, SENTINEL_ATTRIBUTE,
};

const DOCUMENT: &str = r#"{
    "ROOT": { "type": { "resolvedName": "Box" }, "props": {}, "nodes": ["showcase"] },
    "showcase": {
        "type": { "resolvedName": "ProductShowcase" },
        "props": { "columns": 2, "apiUrl": "https://shop.test/items", "limit": 2, "infiniteScroll": true },
        "nodes": ["card"]
    },
    "card": {
        "type": { "resolvedName": "Box" },
        "props": { "customCss": "@media (max-width: 400px) { padding: 0 }" },
        "nodes": ["title"]
    },
    "title": { "type": { "resolvedName": "Text" }, "props": { "content": "Untitled", "field": "name" } }
}"#;

fn document() -> TemplateDocument {
    TemplateDocument::from_json(DOCUMENT).unwrap()
}

fn loaded(names: &[&str]) -> ListSourceState {
    ListSourceState {
        items: names.iter().map(|n| json!({ "name": n })).collect(),
        ..Default::default()
    }
}

// ============================================================================
// Live mode
// ============================================================================

#[test]
fn test_live_card_per_record() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");
    assert_eq!(showcase.config().columns(), 2);

    let grid = showcase.render(&loaded(&["Lamp", "Desk"]), EditorMode::Live);
    assert_eq!(grid.as_element().and_then(|e| e.attr("data-node-id")), Some(showcase.anchor_id()));
    let html = grid.to_html();
    assert!(html.contains("grid-template-columns: repeat(2, 1fr)"));
    assert!(html.contains(">Lamp</p>"));
    assert!(html.contains(">Desk</p>"));
    assert!(grid.find_by_attr(SENTINEL_ATTRIBUTE, "true").is_some());
}

#[test]
fn test_sentinel_hidden_while_loading_more_or_exhausted() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");

    let mut state = loaded(&["Lamp"]);
    state.loading_more = true;
    let grid = showcase.render(&state, EditorMode::Live);
    assert!(grid.find_by_attr(SENTINEL_ATTRIBUTE, "true").is_none());
    assert!(grid.text_content().contains("Loading..."));

    state.loading_more = false;
    state.has_more = false;
    let grid = showcase.render(&state, EditorMode::Live);
    assert!(grid.find_by_attr(SENTINEL_ATTRIBUTE, "true").is_none());
}

#[test]
fn test_messages() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");

    let loading = ListSourceState { loading: true, ..Default::default() };
    assert_eq!(showcase.render(&loading, EditorMode::Live).text_content(), "Loading items...");

    let failed = ListSourceState {
        error: Some("HTTP 500".into()),
        ..Default::default()
    };
    assert_eq!(showcase.render(&failed, EditorMode::Live).text_content(), "HTTP 500");

    assert_eq!(showcase.render(&ListSourceState::default(), EditorMode::Live).text_content(), "No data");

    let unconfigured = Showcase::new(&document, &registry, "showcase", ShowcaseConfig::default());
    assert_eq!(
        unconfigured.render(&ListSourceState::default(), EditorMode::Live).text_content(),
        "Set the list endpoint in the showcase settings"
    );
}

// ============================================================================
// Authoring mode
// ============================================================================

#[test]
fn test_authoring_template_cell_uses_sample_record() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");

    let grid = showcase.render(&ListSourceState::default(), EditorMode::Authoring);
    let text = grid.text_content();
    assert!(text.contains("Template: drop elements here"));
    assert!(text.contains("Product name"));
    assert!(grid.find_by_attr(SENTINEL_ATTRIBUTE, "true").is_none());
}

#[test]
fn test_authoring_previews_capped_at_limit() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");

    let text = showcase.render(&loaded(&["A", "B", "C"]), EditorMode::Authoring).text_content();
    assert!(text.contains("Showing the first page (2 items)"));
    assert!(text.contains("Item 2"));
    assert!(!text.contains("Item 3"));
    assert!(!text.contains("C"));
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_pages_into_document() {
    let document = document();
    let registry = Registry::with_builtins();
    let showcase = Showcase::from_anchor(&document, &registry, "showcase");

    let transport = ScriptedTransport::new()
        .respond_json(&json!({ "data": [{ "name": "Lamp" }, { "name": "Desk" }] }))
        .respond_json(&json!({ "data": [{ "name": "Chair" }] }))
        .respond_json(&json!({ "data": [{ "name": "Never" }] }));
    let source = ListSource::new(transport, showcase.config().source.clone());

    smol::block_on(load_pages(&source, 5, EditorMode::Live));
    assert_eq!(source.transport().request_count(), 2);
    assert_eq!(source.transport().requests()[1].query(), Some("limit=2&offset=2"));

    let grid = showcase.render(&source.state(), EditorMode::Live);
    let page = render_page(&showcase, grid, Viewport::Mobile);
    assert!(page.starts_with("<!DOCTYPE html><html><head>"));
    assert!(page.contains(r#"@container (max-width: 400px) { [data-node-id="card"] { padding: 0 !important } }"#));
    assert!(page.contains("container-type: inline-size"));
    assert!(page.contains("width: 375px"));
    for name in ["Lamp", "Desk", "Chair"] {
        assert!(page.contains(name), "{name}");
    }
    assert!(!page.contains("Never"));
}

#[test]
fn test_authoring_never_paginates() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!([{ "name": "A" }]))
        .respond_json(&json!([{ "name": "B" }]));
    let config = SourceConfig::new("https://shop.test/items").with_limit(1).with_infinite_scroll(true);
    let source = ListSource::new(transport, config);

    smol::block_on(load_pages(&source, 3, EditorMode::Authoring));
    assert_eq!(source.transport().request_count(), 1);
    assert_eq!(source.state().items.len(), 1);
}
