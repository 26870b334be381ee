//! Rank swatches and the two metric explanations

use super::{HoverTarget, InfoTopic, RenderContext, Widget};
use crate::svg::Element;
use fabula_common::scale::ComplexityRank;
use fabula_common::{ScoreTables, StoryRecord};

const WORDINESS_INFO: [&str; 3] = [
    "This data category compares descriptors (adjectives or adverbs) to verbs for each story. This value is displayed",
    "as a ratio (number of descriptors/number of verbs). The higher the ratio, the more likely it is an author opted to",
    "pile on descriptors rather than use one strong action word. The lower the ratio, the better the readability!",
];

const COMPLEXITY_INFO: [&str; 4] = [
    "This data category calculates the average difficulty of the words in each story. Words are scored on a scale of -1 (easy)",
    "to 1 (hard) based on data obtained from https://www.kaggle.com/kkhandekar/word-difficulty. All words with scores > 0",
    "are defined as complex. First, a complex word proportion is computed (complex words/total words), and then that",
    "ratio is multiplied by the average score of each complex word. This yields the story's overall complexity score.",
];

/// Baselines of successive explanation lines
const LINE_Y: [f64; 4] = [10.0, 31.0, 52.0, 73.0];

pub fn info_lines(topic: InfoTopic) -> &'static [&'static str] {
    match topic {
        InfoTopic::Wordiness => &WORDINESS_INFO,
        InfoTopic::Complexity => &COMPLEXITY_INFO,
    }
}

#[derive(Debug, Default)]
pub struct LegendWidget;

impl LegendWidget {
    pub fn new() -> Self {
        Self
    }
}

fn swatch(rank: ComplexityRank, x: f64) -> [Element; 2] {
    [
        Element::new("rect")
            .class(format!("swatch {}", rank.as_str()))
            .num("x", x)
            .num("y", 0.0)
            .num("width", 14.0)
            .num("height", 14.0)
            .attr("style", format!("fill: {}", rank.color())),
        Element::new("text")
            .class("text legend-text")
            .num("x", x + 20.0)
            .num("y", 12.0)
            .text(rank.as_str()),
    ]
}

fn info_button(id: &str, hover: &str, x: f64, label: &str) -> Element {
    Element::new("g")
        .attr("id", id.to_string())
        .class("info-button")
        .attr("data-hover", hover.to_string())
        .child(
            Element::new("circle")
                .num("cx", x)
                .num("cy", 7.0)
                .num("r", 7.0),
        )
        .child(
            Element::new("text")
                .class("text legend-text")
                .num("x", x + 14.0)
                .num("y", 12.0)
                .text(label),
        )
}

impl Widget for LegendWidget {
    fn name(&self) -> &'static str {
        "legend"
    }

    /// The legend does not depend on the selection
    fn update(&mut self, _story: &StoryRecord, _scores: &ScoreTables) {}

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let swatches = ComplexityRank::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, rank)| swatch(*rank, i as f64 * 90.0));

        let topic = match ctx.hover {
            Some(HoverTarget::Info(topic)) => Some(*topic),
            _ => None,
        };
        let mut tip = Element::new("text")
            .class("text legend-text info-tip-text")
            .num("x", 0.0)
            .num("y", LINE_Y[0]);
        if let Some(topic) = topic {
            tip = tip.children(
                info_lines(topic)
                    .iter()
                    .zip(LINE_Y)
                    .map(|(line, y)| Element::new("tspan").num("x", 0.0).num("y", y).text(*line)),
            );
        }

        Element::new("svg")
            .attr("id", "legend-svg")
            .num("width", 900.0)
            .num("height", 130.0)
            .child(
                Element::new("g")
                    .attr("id", "legend-keys")
                    .children(swatches)
                    .child(info_button("wordiness-tip", "info:wordiness", 300.0, "Wordiness"))
                    .child(info_button("complexity-tip", "info:complexity", 420.0, "Complexity")),
            )
            .child(
                Element::new("g")
                    .attr("transform", "translate(0,30)")
                    .child(tip),
            )
            .render()
    }
}
