//! Pagination scenarios for vitrine-source
//!
//! Drives `ListSource` against a scripted transport.

use serde_json::json;
use smol::future::zip;
use vitrine_net::{NetError, Response, ScriptedTransport};
use vitrine_source::{EditorMode, ListSource, Phase, SourceConfig};

const ENDPOINT: &str = "https://shop.test/api/products";

fn paged(limit: usize) -> SourceConfig {
    SourceConfig::new(ENDPOINT).with_limit(limit).with_infinite_scroll(true)
}

// ============================================================================
// INITIAL LOAD
// ============================================================================

#[test]
fn test_data_envelope_full_page() {
    let transport = ScriptedTransport::new().respond_json(&json!({ "data": [{ "id": 1 }, { "id": 2 }] }));
    let source = ListSource::new(transport, paged(2));

    smol::block_on(source.load());

    let state = source.state();
    assert_eq!(state.items.len(), 2);
    assert!(state.has_more);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn test_http_error_then_recovery() {
    let transport = ScriptedTransport::new()
        .respond(Ok(Response::with_status(502)))
        .respond_json(&json!([{ "id": 1 }]));
    let source = ListSource::new(transport, paged(2));

    smol::block_on(source.load());
    assert_eq!(source.phase(), Phase::Errored);
    assert!(source.state().items.is_empty());
    assert_eq!(source.state().error.as_deref(), Some("HTTP 502"));

    smol::block_on(source.reconfigure(SourceConfig::new("https://other.test/api").with_limit(2)));
    assert_eq!(source.phase(), Phase::Loaded);
    assert!(source.state().error.is_none());
    assert_eq!(source.state().items.len(), 1);
}

#[test]
fn test_network_failure_message() {
    let transport = ScriptedTransport::new().respond(Err(NetError::Timeout));
    let source = ListSource::new(transport, paged(2));
    smol::block_on(source.load());
    assert_eq!(source.state().error.as_deref(), Some("Request timed out"));
}

#[test]
fn test_configured_list_path() {
    let transport = ScriptedTransport::new().respond_json(&json!({ "result": { "rows": [{ "name": "a" }] }, "data": [1, 2] }));
    let source = ListSource::new(transport, paged(5).with_list_path("result.rows"));
    smol::block_on(source.load());
    assert_eq!(source.state().items.len(), 1);
    assert_eq!(source.state().items[0]["name"], "a");
}

// ============================================================================
// LOAD MORE
// ============================================================================

#[test]
fn test_empty_next_page_stops_pagination() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!({ "data": [{ "id": 1 }, { "id": 2 }] }))
        .respond_json(&json!({ "data": [] }));
    let source = ListSource::new(transport, paged(2));

    smol::block_on(async {
        source.load().await;
        source.load_more(EditorMode::Live).await;
    });

    let requests = source.transport().requests();
    assert_eq!(requests[1].query(), Some("limit=2&offset=2"));
    assert_eq!(source.state().items.len(), 2);
    assert!(!source.state().has_more);

    // Nothing further is requested once exhausted
    smol::block_on(source.load_more(EditorMode::Live));
    assert_eq!(source.transport().request_count(), 2);
}

#[test]
fn test_load_more_failure_keeps_items() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!([{ "id": 1 }, { "id": 2 }]))
        .respond(Ok(Response::with_status(500)));
    let source = ListSource::new(transport, paged(2));

    smol::block_on(async {
        source.load().await;
        source.load_more(EditorMode::Live).await;
    });

    assert_eq!(source.phase(), Phase::Loaded);
    assert_eq!(source.state().items.len(), 2);
    assert!(!source.state().has_more);
    assert!(source.state().error.is_none());
}

#[test]
fn test_pages_append_in_order() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!([{ "id": 1 }]))
        .respond_json(&json!([{ "id": 2 }]))
        .respond_json(&json!([{ "id": 3 }]));
    let source = ListSource::new(transport, paged(1).with_offset_param("skip"));

    smol::block_on(async {
        source.load().await;
        source.load_more(EditorMode::Live).await;
        source.load_more(EditorMode::Live).await;
    });

    let ids: Vec<_> = source.state().items.iter().map(|item| item["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    assert_eq!(source.transport().requests()[2].query(), Some("limit=1&skip=2"));
}

#[test]
fn test_authoring_mode_never_paginates() {
    let transport = ScriptedTransport::new().respond_json(&json!([{ "id": 1 }]));
    let source = ListSource::new(transport, paged(1));
    smol::block_on(async {
        source.load().await;
        source.load_more(EditorMode::Authoring).await;
    });
    assert_eq!(source.transport().request_count(), 1);
}

// ============================================================================
// CONCURRENCY
// ============================================================================

#[test]
fn test_rapid_load_more_issues_one_request() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!([{ "id": 1 }, { "id": 2 }]))
        .respond_delayed(Ok(Response::ok(json!([{ "id": 3 }]).to_string())), 3);
    let source = ListSource::new(transport, paged(2));

    smol::block_on(async {
        source.load().await;
        zip(source.load_more(EditorMode::Live), source.load_more(EditorMode::Live)).await;
    });

    assert_eq!(source.transport().request_count(), 2);
    assert_eq!(source.transport().max_in_flight(), 1);
    assert_eq!(source.state().items.len(), 3);
}

#[test]
fn test_newer_configuration_wins() {
    // The first load answers late; the reconfigured load answers at once.
    let transport = ScriptedTransport::new()
        .respond_delayed(Ok(Response::ok(json!([{ "name": "old" }]).to_string())), 5)
        .respond_json(&json!([{ "name": "new" }]));
    let source = ListSource::new(transport, paged(10));

    smol::block_on(zip(source.load(), async {
        smol::future::yield_now().await;
        source.reconfigure(SourceConfig::new("https://shop.test/api/v2").with_limit(10)).await;
    }));

    assert_eq!(source.transport().request_count(), 2);
    assert_eq!(source.state().items.len(), 1);
    assert_eq!(source.state().items[0]["name"], "new");
    assert_eq!(source.phase(), Phase::Loaded);
}

#[test]
fn test_reconfigure_drops_in_flight_page() {
    let transport = ScriptedTransport::new()
        .respond_json(&json!([{ "id": 1 }]))
        .respond_delayed(Ok(Response::ok(json!([{ "id": 2 }]).to_string())), 5)
        .respond_json(&json!([{ "id": 9 }]));
    let source = ListSource::new(transport, paged(1));

    smol::block_on(async {
        source.load().await;
        zip(source.load_more(EditorMode::Live), async {
            smol::future::yield_now().await;
            source.reconfigure(SourceConfig::new("https://shop.test/api/v3").with_limit(1)).await;
        })
        .await;
    });

    let ids: Vec<_> = source.state().items.iter().map(|item| item["id"].clone()).collect();
    assert_eq!(ids, vec![json!(9)]);
    assert!(!source.state().loading_more);
}
