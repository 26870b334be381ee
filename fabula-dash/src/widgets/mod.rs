//! Dashboard widgets
//!
//! Every widget builds its static scaffold once in its constructor, sized
//! from its container bounds. [`Widget::update`] replaces the dynamic state
//! derived from the committed story, and [`Widget::render`] serializes the
//! widget as a pure function of that state and the transient hover target.

pub mod diagram;
pub mod legend;
pub mod list;
pub mod spectrum;

pub use diagram::DiagramWidget;
pub use legend::LegendWidget;
pub use list::ListWidget;
pub use spectrum::SpectrumWidget;

use fabula_common::{Error, ScoreTables, StoryRecord};
use std::str::FromStr;

/// A view that follows the committed selection
pub trait Widget: Send + Sync {
    /// Name used in `/api/widgets/:name`
    fn name(&self) -> &'static str;

    /// Adopt `story` as the committed selection
    ///
    /// Idempotent: all state from a previous update is replaced.
    fn update(&mut self, story: &StoryRecord, scores: &ScoreTables);

    /// Serialize the widget; `ctx.hover` never changes widget state
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// Per-request rendering inputs that are not widget state
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub hover: Option<&'a HoverTarget>,
    /// Whether the spectrum draws its connecting lines
    pub lines_visible: bool,
}

impl Default for RenderContext<'_> {
    fn default() -> Self {
        Self {
            hover: None,
            lines_visible: true,
        }
    }
}

impl<'a> RenderContext<'a> {
    pub fn hovered_story(&self) -> Option<&'a str> {
        match self.hover {
            Some(HoverTarget::Story(title)) => Some(title.as_str()),
            _ => None,
        }
    }
}

/// Which explanation a legend info button shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTopic {
    Wordiness,
    Complexity,
}

/// What the pointer is over
///
/// Query syntax: `story:<title>`, `complexity`, `wordiness`,
/// `info:wordiness`, `info:complexity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// A story's point, line or list entry
    Story(String),
    /// The diagram's cover (complexity)
    DiagramComplexity,
    /// The diagram's pages (wordiness)
    DiagramWordiness,
    /// A legend info button
    Info(InfoTopic),
}

impl FromStr for HoverTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complexity" => return Ok(HoverTarget::DiagramComplexity),
            "wordiness" => return Ok(HoverTarget::DiagramWordiness),
            "info:wordiness" => return Ok(HoverTarget::Info(InfoTopic::Wordiness)),
            "info:complexity" => return Ok(HoverTarget::Info(InfoTopic::Complexity)),
            _ => {}
        }
        match s.strip_prefix("story:") {
            Some(title) if !title.is_empty() => Ok(HoverTarget::Story(title.to_string())),
            _ => Err(Error::InvalidInput(format!("unknown hover target '{}'", s))),
        }
    }
}

/// Space around a widget's drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Drawing area derived from a container's size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub margin: Margin,
    /// Inner width (container width minus horizontal margins)
    pub width: f64,
    /// Inner height (total height minus vertical margins)
    pub height: f64,
}

impl Surface {
    pub fn new(container_width: f64, total_height: f64, margin: Margin) -> Self {
        Self {
            margin,
            width: (container_width - margin.left - margin.right).max(0.0),
            height: (total_height - margin.top - margin.bottom).max(0.0),
        }
    }

    pub fn outer_width(&self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }
}
