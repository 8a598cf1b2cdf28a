//! Vitrine Engine
//!
//! Renders an authored card template once per record fetched from a JSON
//! list endpoint.
//!
//! # Example
//! ```rust,ignore
//! use vitrine_engine::{load_pages, render_page, EditorMode, HttpTransport, ListSource, Registry, Showcase, TemplateDocument, Viewport};
//!
//! let document = TemplateDocument::from_json(&text)?;
//! let registry = Registry::with_builtins();
//! let showcase = Showcase::from_anchor(&document, &registry, "showcase");
//! let source = ListSource::new(HttpTransport::new()?, showcase.config().source.clone());
//! smol::block_on(load_pages(&source, 2, EditorMode::Live));
//! let html = render_page(&showcase, showcase.render(&source.state(), EditorMode::Live), Viewport::Mobile);
//! ```

mod config;
mod page;
mod showcase;
mod viewport;

pub use config::{ShowcaseConfig, DEFAULT_COLUMNS};
pub use page::{load_pages, render_page};
pub use showcase::{Showcase, SENTINEL_ATTRIBUTE};
pub use viewport::{UnknownViewport, Viewport};

pub use vitrine_net::{HttpTransport, ScriptedTransport, Transport};
pub use vitrine_source::{EditorMode, ListSource, ListSourceState, Phase, SourceConfig};
pub use vitrine_template::{DocumentError, Registry, RenderedNode, TemplateDocument};

// Re-export sub-crates for advanced usage
pub use vitrine_net as net;
pub use vitrine_path as path;
pub use vitrine_source as source;
pub use vitrine_style as style;
pub use vitrine_template as template;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
