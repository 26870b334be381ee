//! Dashboard state and cross-widget coordination
//!
//! The [`Dashboard`] owns the corpus, the committed selection and the
//! spectrum line visibility. Widgets never reference each other; a
//! committed selection reaches all of them through the
//! [`SelectionNotifier`].

use crate::widgets::{
    DiagramWidget, HoverTarget, LegendWidget, ListWidget, RenderContext, SpectrumWidget, Widget,
};
use fabula_common::config::LayoutConfig;
use fabula_common::loader::LoadedCorpus;
use fabula_common::scale::ComplexityScale;
use fabula_common::{CorpusIndex, Error, Result, ScoreTables, StoryRecord};
use tracing::debug;

/// Fans a committed selection out to every registered widget
#[derive(Default)]
pub struct SelectionNotifier {
    widgets: Vec<Box<dyn Widget>>,
}

impl SelectionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
    }

    /// Call `update` on every widget, in registration order
    pub fn notify(&mut self, story: &StoryRecord, scores: &ScoreTables) {
        for widget in &mut self.widgets {
            widget.update(story, scores);
        }
        debug!(title = %story.title, widgets = self.widgets.len(), "Selection fanned out");
    }

    pub fn widget(&self, name: &str) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.name() == name)
            .map(|w| w.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.widgets.iter().map(|w| w.name())
    }
}

pub struct Dashboard {
    index: CorpusIndex,
    scores: ScoreTables,
    notifier: SelectionNotifier,
    selected: Option<String>,
    lines_visible: bool,
}

impl Dashboard {
    /// Build the widget graph for a loaded corpus
    pub fn new(corpus: LoadedCorpus, layout: &LayoutConfig) -> Self {
        let LoadedCorpus { index, scores } = corpus;
        let ranks = ComplexityScale::from_scores(&scores);

        let mut notifier = SelectionNotifier::new();
        notifier.register(Box::new(DiagramWidget::new(layout.diagram_width, ranks.clone())));
        notifier.register(Box::new(SpectrumWidget::new(layout.spectrum_width, &scores, &ranks)));
        notifier.register(Box::new(ListWidget::new(&scores)));
        notifier.register(Box::new(LegendWidget::new()));

        Self {
            index,
            scores,
            notifier,
            selected: None,
            lines_visible: true,
        }
    }

    /// Commit `title` as the selection and update every widget
    pub fn select(&mut self, title: &str) -> Result<&StoryRecord> {
        let story = self
            .index
            .get(title)
            .ok_or_else(|| Error::NotFound(format!("story '{}'", title)))?;
        self.notifier.notify(story, &self.scores);
        self.selected = Some(story.title.clone());
        Ok(story)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Show or hide the spectrum's connecting lines; returns whether it changed
    pub fn set_lines_visible(&mut self, visible: bool) -> bool {
        let changed = self.lines_visible != visible;
        self.lines_visible = visible;
        changed
    }

    pub fn lines_visible(&self) -> bool {
        self.lines_visible
    }

    /// Markup of widget `name` with an optional transient hover
    pub fn render(&self, name: &str, hover: Option<&HoverTarget>) -> Result<String> {
        let widget = self
            .notifier
            .widget(name)
            .ok_or_else(|| Error::NotFound(format!("widget '{}'", name)))?;
        let ctx = RenderContext {
            hover,
            lines_visible: self.lines_visible,
        };
        Ok(widget.render(&ctx))
    }

    pub fn widget_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.notifier.names()
    }

    pub fn stories(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn scores(&self) -> &ScoreTables {
        &self.scores
    }
}
