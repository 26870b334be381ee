//! Book diagram
//!
//! A book drawing whose middle cover is coloured by the committed story's
//! complexity rank and whose pages carry one line per 70 scaled units of
//! wordiness.

use super::{HoverTarget, Margin, RenderContext, Surface, Widget};
use crate::svg::{self, Element};
use fabula_common::scale::{ComplexityRank, ComplexityScale, LinearScale, HIGHLIGHT_COLOR};
use fabula_common::{wordiness, ScoreTables, StoryRecord, Wordiness};

const HEIGHT: f64 = 350.0;
const MARGIN: Margin = Margin {
    top: 0.0,
    right: 20.0,
    bottom: 30.0,
    left: 20.0,
};

/// Scaled wordiness of the wordiest story
pub const MAX_SCALED: f64 = 1260.0;
/// Scaled units per full page line
pub const LINE_UNITS: f64 = 70.0;
/// Two pages of nine lines
pub const MAX_FULL_LINES: usize = 18;
const LINES_PER_PAGE: usize = 9;

/// Scaled value drawn before any selection (7 full lines and a short one)
const PLACEHOLDER_SCALED: f64 = 7.0 * LINE_UNITS + 30.0;

/// One page line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

fn row_y(row: usize) -> f64 {
    105.0 + (row % LINES_PER_PAGE) as f64 * 15.0
}

/// Page lines for a wordiness already mapped onto `[0, 1260]`
///
/// Full lines `1..=floor(scaled / 70)` fill the left page then the right
/// one; the remainder is drawn as a shorter line on the next row.
pub fn wordiness_segments(scaled: f64) -> Vec<Segment> {
    if !scaled.is_finite() || scaled <= 0.0 {
        return Vec::new();
    }
    let full = ((scaled / LINE_UNITS).floor() as usize).min(MAX_FULL_LINES);
    let mut segments: Vec<Segment> = (1..=full)
        .map(|d| {
            let right = d > LINES_PER_PAGE;
            Segment {
                x1: if right { 158.0 } else { 70.0 },
                x2: if right { 230.0 } else { 140.0 },
                y: row_y(d - 1),
            }
        })
        .collect();

    let remainder = scaled % LINE_UNITS;
    if remainder > 0.0 && full < MAX_FULL_LINES {
        let x1 = if full + 1 > LINES_PER_PAGE { 158.0 } else { 70.0 };
        segments.push(Segment {
            x1,
            x2: x1 + remainder,
            y: row_y(full),
        });
    }
    segments
}

/// State derived from the committed story
#[derive(Debug, Clone)]
struct Committed {
    title: String,
    rank: ComplexityRank,
    complexity: f64,
    wordiness: Wordiness,
    segments: Vec<Segment>,
}

pub struct DiagramWidget {
    surface: Surface,
    ranks: ComplexityScale,
    /// Container, outer cover and spine circle
    back: Vec<Element>,
    /// Inner pages and page corners
    pages: Vec<Element>,
    placeholder: Vec<Segment>,
    committed: Option<Committed>,
}

impl DiagramWidget {
    pub fn new(container_width: f64, ranks: ComplexityScale) -> Self {
        let surface = Surface::new(container_width, HEIGHT, MARGIN);

        let back = vec![
            Element::new("rect")
                .class("container-rect")
                .num("x", 0.0)
                .num("y", 0.0)
                .num("width", surface.width)
                .num("height", surface.height),
            Element::new("circle")
                .class("outer-legend")
                .num("cx", 150.0)
                .num("cy", 250.0)
                .num("r", 25.0),
            Element::new("rect")
                .class("outer-legend")
                .num("x", 40.0)
                .num("y", 110.0)
                .num("height", 150.0)
                .num("width", 220.0),
        ];

        let page = |x: f64| {
            Element::new("rect")
                .class("inner-legend")
                .attr("data-hover", "wordiness")
                .num("x", x)
                .num("y", 90.0)
                .num("height", 150.0)
                .num("width", 88.0)
        };
        let corner = |points: &str| {
            Element::new("polygon")
                .class("inner-legend")
                .attr("data-hover", "wordiness")
                .attr("points", points)
        };
        let pages = vec![
            page(60.0),
            page(150.0),
            corner("135,240 148,240 148,248"),
            corner("150,240 150,248 163,240"),
        ];

        Self {
            surface,
            ranks,
            back,
            pages,
            placeholder: wordiness_segments(PLACEHOLDER_SCALED),
            committed: None,
        }
    }

    /// Page lines currently drawn
    pub fn segments(&self) -> &[Segment] {
        match &self.committed {
            Some(c) => &c.segments,
            None => &self.placeholder,
        }
    }

    fn middle_cover(&self, hover: Option<&HoverTarget>) -> [Element; 2] {
        let (class, fill) = match &self.committed {
            Some(c) => {
                let fill = if hover == Some(&HoverTarget::DiagramComplexity) {
                    HIGHLIGHT_COLOR
                } else {
                    c.rank.color()
                };
                (format!("middle-legend {}", c.rank.as_str()), Some(fill))
            }
            None => ("middle-legend".to_string(), None),
        };
        let styled = |e: Element| match fill {
            Some(fill) => e.attr("style", format!("fill: {}", fill)),
            None => e,
        };
        [
            styled(
                Element::new("circle")
                    .class(class.clone())
                    .attr("data-hover", "complexity")
                    .num("cx", 150.0)
                    .num("cy", 245.0)
                    .num("r", 18.0),
            ),
            styled(
                Element::new("rect")
                    .class(class)
                    .attr("data-hover", "complexity")
                    .num("x", 50.0)
                    .num("y", 100.0)
                    .num("height", 150.0)
                    .num("width", 200.0),
            ),
        ]
    }

    /// Tooltip label and value for the active hover, if any
    fn tooltip(&self, hover: Option<&HoverTarget>) -> (String, String) {
        let Some(c) = &self.committed else {
            return (String::new(), String::new());
        };
        match hover {
            Some(HoverTarget::DiagramComplexity) => {
                ("Complexity:".to_string(), format!("{:.6}", c.complexity))
            }
            Some(HoverTarget::DiagramWordiness) => ("Wordiness:".to_string(), c.wordiness.to_string()),
            _ => (String::new(), String::new()),
        }
    }
}

impl Widget for DiagramWidget {
    fn name(&self) -> &'static str {
        "diagram"
    }

    fn update(&mut self, story: &StoryRecord, scores: &ScoreTables) {
        let ratio = wordiness(story);
        let segments = match ratio {
            Wordiness::Ratio(value) => {
                let max = scores.max_wordiness();
                let scaled = if max > 0.0 {
                    LinearScale::new((0.0, max), (0.0, MAX_SCALED)).apply(value)
                } else {
                    0.0
                };
                wordiness_segments(scaled)
            }
            Wordiness::Undefined => Vec::new(),
        };

        self.committed = Some(Committed {
            title: story.title.clone(),
            rank: self.ranks.rank(story.complexity),
            complexity: story.complexity,
            wordiness: ratio,
            segments,
        });
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let hover = ctx.hover;
        let lines_highlighted =
            self.committed.is_some() && hover == Some(&HoverTarget::DiagramWordiness);

        let lines = self.segments().iter().map(|s| {
            let line = Element::new("line")
                .class("legend-lines")
                .num("x1", s.x1)
                .num("y1", s.y)
                .num("x2", s.x2)
                .num("y2", s.y);
            if lines_highlighted {
                line.attr("style", format!("stroke: {}", HIGHLIGHT_COLOR))
            } else {
                line
            }
        });

        let title = match &self.committed {
            Some(c) => c.title.as_str(),
            None => "SELECT A STORY",
        };
        let mut subtitle = Element::new("text")
            .class("text")
            .attr("id", "diagram-subtitle")
            .num("x", self.surface.width / 2.0)
            .num("y", 70.0)
            .text("Hover over diagram for more info");
        if self.committed.is_none() {
            subtitle = subtitle.attr("display", "none");
        }

        let (label, value) = self.tooltip(hover);
        let tip = |y: f64, text: String| {
            Element::new("text")
                .attr("style", format!("fill: {}", HIGHLIGHT_COLOR))
                .class("text story-data")
                .num("x", 3.0 * self.surface.width / 4.0)
                .num("y", y)
                .text(text)
        };

        let body = Element::new("g")
            .attr("transform", svg::translate(self.surface.margin.left, self.surface.margin.top))
            .children(self.back.iter().cloned())
            .children(self.middle_cover(hover))
            .children(self.pages.iter().cloned())
            .children(lines)
            .child(
                Element::new("text")
                    .class("text")
                    .attr("id", "story-title")
                    .num("x", self.surface.width / 2.0)
                    .num("y", 40.0)
                    .text(title),
            )
            .child(subtitle)
            .child(tip(self.surface.height / 2.0, label))
            .child(tip(self.surface.height / 2.0 + 30.0, value));

        Element::new("svg")
            .attr("id", "diagram-svg")
            .num("width", self.surface.outer_width())
            .num("height", self.surface.outer_height())
            .child(body)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_common::CorpusIndex;

    fn story(title: &str, complexity: f64, descriptors: usize, verbs: usize) -> StoryRecord {
        StoryRecord {
            title: title.to_string(),
            words: Vec::new(),
            descriptors: vec!["old".to_string(); descriptors],
            verbs: vec!["went".to_string(); verbs],
            complexity,
            token_count: 100,
        }
    }

    fn fixture() -> (CorpusIndex, ScoreTables) {
        let index = CorpusIndex::from_records(vec![
            story("TOM TIT TOT", 0.10, 2, 2),
            story("MR. FOX", 0.20, 4, 2),
            story("HENNY-PENNY", 0.30, 3, 0),
        ])
        .unwrap();
        let scores = ScoreTables::from_index(&index);
        (index, scores)
    }

    fn widget(scores: &ScoreTables) -> DiagramWidget {
        DiagramWidget::new(640.0, ComplexityScale::from_scores(scores))
    }

    #[test]
    fn test_segments_for_partial_left_page() {
        // 7 full lines, then 30 units on row 7
        let segments = wordiness_segments(520.0);
        assert_eq!(segments.len(), 8);
        assert_eq!(segments[0], Segment { x1: 70.0, x2: 140.0, y: 105.0 });
        assert_eq!(segments[7], Segment { x1: 70.0, x2: 100.0, y: 210.0 });
    }

    #[test]
    fn test_segments_spill_onto_right_page() {
        // 630 / 70 = 9 full lines, no remainder
        let segments = wordiness_segments(630.0);
        assert_eq!(segments.len(), 9);
        assert!(segments.iter().all(|s| s.x1 == 70.0));

        // 10 full lines plus 35 units; the 10th starts the right page at row 0
        let segments = wordiness_segments(735.0);
        assert_eq!(segments.len(), 11);
        assert_eq!(segments[9], Segment { x1: 158.0, x2: 230.0, y: 105.0 });
        assert_eq!(segments[10], Segment { x1: 158.0, x2: 193.0, y: 120.0 });
    }

    #[test]
    fn test_segments_at_maximum() {
        let segments = wordiness_segments(MAX_SCALED);
        assert_eq!(segments.len(), MAX_FULL_LINES);
        assert_eq!(segments.last().unwrap().y, row_y(8));
        assert!(wordiness_segments(0.0).is_empty());
    }

    #[test]
    fn test_initial_render_shows_placeholder() {
        let (_, scores) = fixture();
        let diagram = widget(&scores);
        let out = diagram.render(&RenderContext::default());
        assert!(out.contains("SELECT A STORY"));
        assert!(out.contains(r#"display="none""#));
        assert_eq!(out.matches("legend-lines").count(), 8);
        assert!(out.contains(r#"x1="70" y1="210" x2="100" y2="210""#));
    }

    #[test]
    fn test_hover_before_selection_has_no_effect() {
        let (_, scores) = fixture();
        let diagram = widget(&scores);
        let plain = diagram.render(&RenderContext::default());
        for hover in [HoverTarget::DiagramComplexity, HoverTarget::DiagramWordiness] {
            let ctx = RenderContext { hover: Some(&hover), ..Default::default() };
            assert_eq!(diagram.render(&ctx), plain);
        }
    }

    #[test]
    fn test_update_draws_story() {
        let (index, scores) = fixture();
        let mut diagram = widget(&scores);
        diagram.update(index.get("MR. FOX").unwrap(), &scores);

        // wordiest story fills both pages
        assert_eq!(diagram.segments().len(), MAX_FULL_LINES);
        let out = diagram.render(&RenderContext::default());
        assert!(out.contains("MR. FOX"));
        assert!(!out.contains("SELECT A STORY"));
        assert!(out.contains("middle-legend medium"));
        assert!(out.contains("fill: #faf887"));

        diagram.update(index.get("TOM TIT TOT").unwrap(), &scores);
        // ratio 1.0 of max 2.0 scales to 630: nine full lines
        assert_eq!(diagram.segments().len(), 9);
        assert!(diagram.render(&RenderContext::default()).contains("middle-legend easy"));
    }

    #[test]
    fn test_hover_tooltips() {
        let (index, scores) = fixture();
        let mut diagram = widget(&scores);
        diagram.update(index.get("TOM TIT TOT").unwrap(), &scores);

        let hover = HoverTarget::DiagramComplexity;
        let out = diagram.render(&RenderContext { hover: Some(&hover), ..Default::default() });
        assert!(out.contains(">Complexity:<"));
        assert!(out.contains(">0.100000<"));
        assert!(out.contains(r#"r="18" style="fill: #DAA520""#));

        let hover = HoverTarget::DiagramWordiness;
        let out = diagram.render(&RenderContext { hover: Some(&hover), ..Default::default() });
        assert!(out.contains(">Wordiness:<"));
        assert!(out.contains(">1.000<"));
        assert_eq!(out.matches("stroke: #DAA520").count(), 9);
    }

    #[test]
    fn test_zero_verb_story() {
        let (index, scores) = fixture();
        let mut diagram = widget(&scores);
        diagram.update(index.get("HENNY-PENNY").unwrap(), &scores);
        assert!(diagram.segments().is_empty());

        let hover = HoverTarget::DiagramWordiness;
        let out = diagram.render(&RenderContext { hover: Some(&hover), ..Default::default() });
        assert!(out.contains(">n/a<"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let (index, scores) = fixture();
        let mut once = widget(&scores);
        once.update(index.get("MR. FOX").unwrap(), &scores);

        let mut twice = widget(&scores);
        twice.update(index.get("TOM TIT TOT").unwrap(), &scores);
        twice.update(index.get("MR. FOX").unwrap(), &scores);
        twice.update(index.get("MR. FOX").unwrap(), &scores);

        let ctx = RenderContext::default();
        assert_eq!(once.render(&ctx), twice.render(&ctx));
    }
}
