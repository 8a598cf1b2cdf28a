//! Canvas viewport presets
//!
//! The canvas is an inline-size container, so compiled `@container` rules
//! follow the preset width rather than the browser window.

use std::fmt;
use std::str::FromStr;

use vitrine_style::Declarations;
use vitrine_template::{Element, RenderedNode};

/// Device preview width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Unrecognized viewport name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown viewport '{0}' (expected desktop, tablet or mobile)")]
pub struct UnknownViewport(pub String);

impl Viewport {
    pub const ALL: [Viewport; 3] = [Viewport::Desktop, Viewport::Tablet, Viewport::Mobile];

    /// Fixed canvas width in pixels; `None` fills the window
    pub fn width(self) -> Option<u32> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(768),
            Self::Mobile => Some(375),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    pub fn canvas_style(self) -> Declarations {
        let (max_width, width) = match self.width() {
            Some(px) => (format!("{px}px"), format!("{px}px")),
            None => ("1200px".to_string(), "100%".to_string()),
        };
        Declarations::new()
            .with("max-width", max_width)
            .with("width", width)
            .with("margin", "0 auto")
            .with("min-height", "400px")
            .with("background", "#fff")
            .with("border", "2px dashed #ccc")
            .with("border-radius", "8px")
            .with("container-type", "inline-size")
    }

    /// Wrap `content` in the canvas container.
    pub fn canvas(self, content: impl IntoIterator<Item = RenderedNode>) -> RenderedNode {
        Element::new("div")
            .with_attr("data-viewport", self.name())
            .with_style(self.canvas_style())
            .with_children(content)
            .into()
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Viewport {
    type Err = UnknownViewport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownViewport(name.to_string()))
    }
}
