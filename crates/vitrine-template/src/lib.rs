//! Vitrine Template
//!
//! Instances an authored node graph once per bound record.
//!
//! A [`TemplateDocument`] holds node descriptors keyed by id. Rendering
//! resolves each node's type name against a [`Registry`] and passes the
//! bound record down explicitly through [`RenderContext`]:
//!
//! ```
//! use serde_json::json;
//! use vitrine_template::{render, NodeDescriptor, Registry, RenderContext, TemplateDocument};
//!
//! let document = TemplateDocument::new()
//!     .with(NodeDescriptor::new("title", "Text").with_property("field", "name"));
//! let record = json!({ "name": "Lamp" });
//! let out = render(&["title".to_string()], &document, &Registry::with_builtins(), &RenderContext::bound(&record));
//! assert_eq!(out[0].text_content(), "Lamp");
//! ```

pub mod components;
mod document;
mod interpreter;
mod node;
mod registry;

pub use document::{DocumentError, NodeDescriptor, TemplateDocument};
pub use interpreter::{collect_stylesheet, render, TemplateRenderer};
pub use node::{to_html, Element, RenderedNode};
pub use registry::{NodeRenderer, Registry, RenderContext};
