//! Pagination state machine
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Loaded ──load_more──▶ LoadingMore
//!                   │                ▲                     │
//!                   └──err──▶ Errored└──────ok / err───────┘
//! ```
//!
//! The machine is synchronous: starting a fetch hands out a [`FetchRequest`]
//! ticket, and the eventual outcome is fed back through
//! [`ListMachine::complete`]. Tickets carry the configuration generation
//! they were issued under, so a response for a superseded configuration is
//! discarded.

use serde_json::Value;
use vitrine_net::{parse_endpoint, with_query_param, NetError, Response, Url};
use vitrine_path::{enumerate_leaf_paths, DEFAULT_LEAF_DEPTH};

use crate::config::{EditorMode, SourceConfig, PAGE_SIZE_PARAM};
use crate::extract::extract_list;
use crate::record::normalize_record;

/// Observable list state
#[derive(Debug, Clone, PartialEq)]
pub struct ListSourceState {
    pub items: Vec<Value>,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    /// Approximation: true while the last page came back full
    pub has_more: bool,
    /// Leaf paths of the first record, offered as field bindings
    pub field_paths: Vec<String>,
}

impl Default for ListSourceState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loading_more: false,
            error: None,
            has_more: true,
            field_paths: Vec::new(),
        }
    }
}

/// Coarse lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    LoadingMore,
    Errored,
}

/// Which kind of fetch a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

/// Ticket for one outstanding request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: FetchKind,
    pub url: Url,
    generation: u64,
}

/// Owner of a [`ListSourceState`] and the only code path writing it
#[derive(Debug)]
pub struct ListMachine {
    config: SourceConfig,
    endpoint: Option<Url>,
    state: ListSourceState,
    phase: Phase,
    generation: u64,
}

impl ListMachine {
    /// Create an idle machine. Nothing is fetched until [`start_load`](Self::start_load).
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            endpoint: None,
            state: ListSourceState::default(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn state(&self) -> &ListSourceState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Replace the configuration.
    ///
    /// Changing the endpoint, page size or list path discards everything and
    /// starts a fresh load, superseding any request still in flight. Other
    /// changes (pagination switches) apply in place.
    pub fn configure(&mut self, config: SourceConfig) -> Option<FetchRequest> {
        let reload = self.config.requires_reload(&config) || self.phase == Phase::Idle;
        self.config = config;
        if reload { self.restart() } else { None }
    }

    /// Begin the initial load for the current configuration.
    ///
    /// Dropped while an initial load is already in flight.
    pub fn start_load(&mut self) -> Option<FetchRequest> {
        if self.phase == Phase::Loading {
            tracing::debug!("initial load already in flight");
            return None;
        }
        self.restart()
    }

    fn restart(&mut self) -> Option<FetchRequest> {
        self.generation += 1;
        self.state = ListSourceState::default();
        self.endpoint = None;

        let Some(endpoint) = self.config.endpoint() else {
            self.phase = Phase::Idle;
            return None;
        };

        match parse_endpoint(endpoint) {
            Ok(url) => {
                let url = with_query_param(&url, PAGE_SIZE_PARAM, &self.config.page_size().to_string());
                self.endpoint = Some(url.clone());
                self.state.loading = true;
                self.phase = Phase::Loading;
                tracing::info!(generation = self.generation, "loading {}", url);
                Some(FetchRequest {
                    kind: FetchKind::Initial,
                    url,
                    generation: self.generation,
                })
            }
            Err(e) => {
                tracing::warn!("cannot load list: {}", e);
                self.state.error = Some(e.to_string());
                self.phase = Phase::Errored;
                None
            }
        }
    }

    /// Begin loading the next page.
    ///
    /// No-op while a page is already loading, once the source reports no
    /// more records, in authoring mode, with incremental loading disabled,
    /// or outside the loaded phase.
    pub fn begin_load_more(&mut self, mode: EditorMode) -> Option<FetchRequest> {
        if self.state.loading_more
            || !self.state.has_more
            || mode == EditorMode::Authoring
            || !self.config.infinite_scroll
            || self.phase != Phase::Loaded
        {
            return None;
        }
        let endpoint = self.endpoint.as_ref()?;

        let offset = self.state.items.len().to_string();
        let url = with_query_param(endpoint, self.config.offset_param(), &offset);

        self.state.loading_more = true;
        self.phase = Phase::LoadingMore;
        tracing::info!(offset = %offset, "loading more from {}", url);

        Some(FetchRequest {
            kind: FetchKind::More,
            url,
            generation: self.generation,
        })
    }

    /// Apply the outcome of `request`.
    ///
    /// Returns `false` when the ticket was superseded and the outcome ignored.
    pub fn complete(&mut self, request: &FetchRequest, outcome: Result<Response, NetError>) -> bool {
        if request.generation != self.generation {
            tracing::debug!(
                ticket = request.generation,
                current = self.generation,
                "ignoring response for superseded configuration"
            );
            return false;
        }

        let items = outcome.and_then(Response::error_for_status).map(|response| self.read_items(&response));

        match (request.kind, items) {
            (FetchKind::Initial, Ok(items)) => {
                tracing::info!(count = items.len(), "list loaded");
                self.state.has_more = items.len() >= self.config.page_size();
                self.state.items = items;
                self.state.loading = false;
                self.record_field_paths();
                self.phase = Phase::Loaded;
            }
            (FetchKind::Initial, Err(e)) => {
                tracing::warn!("list load failed: {}", e);
                self.state.items.clear();
                self.state.error = Some(e.to_string());
                self.state.loading = false;
                self.phase = Phase::Errored;
            }
            (FetchKind::More, Ok(items)) => {
                tracing::info!(count = items.len(), "page appended");
                self.state.has_more = items.len() >= self.config.page_size();
                self.state.items.extend(items);
                self.state.loading_more = false;
                self.record_field_paths();
                self.phase = Phase::Loaded;
            }
            (FetchKind::More, Err(e)) => {
                tracing::warn!("loading more failed, pagination stopped: {}", e);
                self.state.has_more = false;
                self.state.loading_more = false;
                self.phase = Phase::Loaded;
            }
        }
        true
    }

    fn read_items(&self, response: &Response) -> Vec<Value> {
        let body = response.json().unwrap_or_else(|e| {
            tracing::warn!("treating unreadable body as empty list: {}", e);
            Value::Null
        });
        extract_list(&body, self.config.list_path())
            .into_iter()
            .map(normalize_record)
            .collect()
    }

    fn record_field_paths(&mut self) {
        if !self.state.field_paths.is_empty() {
            return;
        }
        if let Some(first) = self.state.items.first() {
            self.state.field_paths = enumerate_leaf_paths(first, DEFAULT_LEAF_DEPTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(config: SourceConfig, body: Value) -> ListMachine {
        let mut machine = ListMachine::new(config);
        let request = machine.start_load().unwrap();
        assert!(machine.complete(&request, Ok(Response::ok(body.to_string()))));
        machine
    }

    #[test]
    fn test_idle_without_endpoint() {
        let mut machine = ListMachine::new(SourceConfig::default());
        assert!(machine.start_load().is_none());
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(!machine.state().loading);
        assert!(machine.state().has_more);
    }

    #[test]
    fn test_initial_request_carries_limit() {
        let mut machine = ListMachine::new(SourceConfig::new("https://x.test/p?limit=99").with_limit(2));
        let request = machine.start_load().unwrap();
        assert_eq!(request.kind, FetchKind::Initial);
        assert_eq!(request.url.as_str(), "https://x.test/p?limit=2");
        assert!(machine.state().loading);
        assert_eq!(machine.phase(), Phase::Loading);
    }

    #[test]
    fn test_second_initial_trigger_dropped() {
        let mut machine = ListMachine::new(SourceConfig::new("https://x.test/p"));
        assert!(machine.start_load().is_some());
        assert!(machine.start_load().is_none());
    }

    #[test]
    fn test_invalid_endpoint_errors() {
        let mut machine = ListMachine::new(SourceConfig::new("nope"));
        assert!(machine.start_load().is_none());
        assert_eq!(machine.phase(), Phase::Errored);
        assert!(machine.state().error.as_deref().unwrap().starts_with("Invalid URL"));
    }

    #[test]
    fn test_loaded_records_field_paths() {
        let machine = loaded(
            SourceConfig::new("https://x.test/p").with_limit(2),
            json!({ "data": [{ "id": 1 }, { "id": 2 }] }),
        );
        assert_eq!(machine.state().items.len(), 2);
        assert!(machine.state().has_more);
        assert_eq!(machine.state().field_paths, vec!["id", "product_variation_id"]);
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let machine = loaded(SourceConfig::new("https://x.test/p").with_limit(3), json!([{ "id": 1 }]));
        assert!(!machine.state().has_more);
    }

    #[test]
    fn test_unreadable_body_is_empty_list() {
        let mut machine = ListMachine::new(SourceConfig::new("https://x.test/p"));
        let request = machine.start_load().unwrap();
        machine.complete(&request, Ok(Response::ok("<html>oops</html>")));
        assert_eq!(machine.phase(), Phase::Loaded);
        assert!(machine.state().items.is_empty());
        assert!(machine.state().error.is_none());
    }

    #[test]
    fn test_load_more_guards() {
        let config = SourceConfig::new("https://x.test/p").with_limit(1);
        let body = json!([{ "id": 1 }]);

        let mut machine = loaded(config.clone(), body.clone());
        assert!(machine.begin_load_more(EditorMode::Live).is_none(), "infinite scroll disabled");

        let mut machine = loaded(config.clone().with_infinite_scroll(true), body.clone());
        assert!(machine.begin_load_more(EditorMode::Authoring).is_none());
        let request = machine.begin_load_more(EditorMode::Live).unwrap();
        assert_eq!(request.url.as_str(), "https://x.test/p?limit=1&offset=1");
        assert!(machine.begin_load_more(EditorMode::Live).is_none(), "already loading more");
    }

    #[test]
    fn test_load_more_not_from_loading() {
        let mut machine = ListMachine::new(SourceConfig::new("https://x.test/p").with_infinite_scroll(true));
        machine.start_load();
        assert!(machine.begin_load_more(EditorMode::Live).is_none());
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut machine = ListMachine::new(SourceConfig::new("https://a.test/"));
        let stale = machine.start_load().unwrap();
        let fresh = machine.configure(SourceConfig::new("https://b.test/")).unwrap();

        assert!(!machine.complete(&stale, Ok(Response::ok("[1]"))));
        assert!(machine.state().loading);
        assert!(machine.complete(&fresh, Ok(Response::ok("[2, 3]"))));
        assert_eq!(machine.state().items, vec![json!(2), json!(3)]);
    }

    #[test]
    fn test_configure_without_reload() {
        let mut machine = loaded(SourceConfig::new("https://x.test/p").with_limit(1), json!([1]));
        assert!(machine.configure(SourceConfig::new("https://x.test/p").with_limit(1).with_infinite_scroll(true)).is_none());
        assert_eq!(machine.state().items.len(), 1);
        assert!(machine.begin_load_more(EditorMode::Live).is_some());
    }
}
