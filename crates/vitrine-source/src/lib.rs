//! Vitrine List Source
//!
//! Paginated retrieval of records from a JSON list endpoint.
//!
//! A [`ListSource`] owns a [`ListSourceState`] and moves it through
//! `Idle → Loading → Loaded/Errored`, then `Loaded → LoadingMore → Loaded`
//! as further pages are requested. Responses are reduced to a list of
//! records through a configured path or common envelope shapes, and each
//! record is normalized to a catalog item.

mod config;
mod extract;
mod record;
mod source;
mod state;

pub use config::{read_property, EditorMode, SourceConfig, DEFAULT_LIMIT, DEFAULT_OFFSET_PARAM, PAGE_SIZE_PARAM};
pub use extract::{extract_list, ENVELOPE_PATHS};
pub use record::{normalize_record, sample_record};
pub use source::ListSource;
pub use state::{FetchKind, FetchRequest, ListMachine, ListSourceState, Phase};
