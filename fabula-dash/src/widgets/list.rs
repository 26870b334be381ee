//! Clickable list of story titles

use super::{RenderContext, Widget};
use crate::svg::Element;
use fabula_common::{ScoreTables, StoryRecord};

pub struct ListWidget {
    titles: Vec<String>,
    selected: Option<String>,
}

impl ListWidget {
    /// One entry per story, in corpus order
    pub fn new(scores: &ScoreTables) -> Self {
        Self {
            titles: scores.entries().iter().map(|e| e.title.clone()).collect(),
            selected: None,
        }
    }
}

impl Widget for ListWidget {
    fn name(&self) -> &'static str {
        "list"
    }

    fn update(&mut self, story: &StoryRecord, _scores: &ScoreTables) {
        self.selected = Some(story.title.clone());
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let hovered = ctx.hovered_story();
        let entries = self.titles.iter().map(|title| {
            let mut class = String::from("text list-text");
            if self.selected.as_deref() == Some(title.as_str()) {
                class.push_str(" selected");
            } else if hovered == Some(title.as_str()) {
                class.push_str(" hover");
            }
            Element::new("span")
                .class(class)
                .attr("data-select", title.clone())
                .attr("data-hover", format!("story:{}", title))
                .text(title.clone())
        });

        Element::new("p")
            .attr("id", "list-entries")
            .attr("text-align", "center")
            .children(entries)
            .render()
    }
}
