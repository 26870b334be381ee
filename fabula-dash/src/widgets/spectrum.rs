//! Wordiness/complexity spectrum
//!
//! Two horizontal axes, wordiness above and complexity below, with one
//! point per story on each and a line joining a story's two points.

use super::{Margin, RenderContext, Surface, Widget};
use crate::svg::{self, Element};
use fabula_common::scale::{ComplexityRank, ComplexityScale, LinearScale, HIGHLIGHT_COLOR};
use fabula_common::{ScoreTables, StoryRecord};

const HEIGHT: f64 = 280.0;
const MARGIN: Margin = Margin {
    top: 20.0,
    right: 20.0,
    bottom: 30.0,
    left: 20.0,
};

/// Space between the drawing edge and each axis end
pub const SIDE_MARGIN: f64 = 50.0;
pub const WORDINESS_AXIS_Y: f64 = 75.0;
pub const COMPLEXITY_AXIS_Y: f64 = 200.0;
const TICK_COUNT: usize = 10;

const COMMITTED_TIP_Y: f64 = 57.0;
const HOVER_TIP_Y: f64 = 40.0;

const POINT_RADIUS: f64 = 5.0;
const HIGHLIGHT_RADIUS: f64 = 10.0;
const HIGHLIGHT_STROKE_WIDTH: f64 = 3.0;

/// A story's position on both axes
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumPoint {
    pub title: String,
    pub rank: ComplexityRank,
    /// Position on the wordiness axis; `None` when wordiness is undefined
    pub wordiness_x: Option<f64>,
    pub complexity_x: f64,
}

impl SpectrumPoint {
    /// Horizontal position of this story's title tip
    pub fn tip_x(&self) -> f64 {
        self.wordiness_x.unwrap_or(self.complexity_x) + SIDE_MARGIN
    }
}

pub struct SpectrumWidget {
    surface: Surface,
    /// Axes and their labels
    axes: Vec<Element>,
    points: Vec<SpectrumPoint>,
    committed: Option<usize>,
}

impl SpectrumWidget {
    pub fn new(container_width: f64, scores: &ScoreTables, ranks: &ComplexityScale) -> Self {
        let surface = Surface::new(container_width, HEIGHT, MARGIN);
        let graph = (surface.width - 2.0 * SIDE_MARGIN).max(0.0);

        let wordiness_scale = LinearScale::new((0.0, scores.max_wordiness()), (0.0, graph));
        let complexity_scale = LinearScale::new((0.0, scores.max_complexity()), (0.0, graph));

        let label = |y: f64, text: &str| {
            Element::new("text")
                .class("text axis-label")
                .num("x", SIDE_MARGIN + graph)
                .num("y", y)
                .text(text)
        };
        let axes = vec![
            axis("w-axis", WORDINESS_AXIS_Y, &wordiness_scale),
            label(110.0, "Wordiness"),
            axis("c-axis", COMPLEXITY_AXIS_Y, &complexity_scale),
            label(235.0, "Complexity"),
        ];

        let points = scores
            .entries()
            .iter()
            .map(|entry| SpectrumPoint {
                title: entry.title.clone(),
                rank: ranks.rank(entry.complexity),
                wordiness_x: entry.wordiness.value().map(|w| scale_or_zero(&wordiness_scale, w)),
                complexity_x: scale_or_zero(&complexity_scale, entry.complexity),
            })
            .collect();

        Self {
            surface,
            axes,
            points,
            committed: None,
        }
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn committed(&self) -> Option<&SpectrumPoint> {
        self.committed.map(|i| &self.points[i])
    }

    fn point(&self, title: &str) -> Option<&SpectrumPoint> {
        self.points.iter().find(|p| p.title == title)
    }

    fn render_points(&self, highlighted: &dyn Fn(&SpectrumPoint) -> bool) -> [Element; 3] {
        let mut w_points = Element::new("g")
            .attr("transform", svg::translate(SIDE_MARGIN, WORDINESS_AXIS_Y))
            .attr("id", "w-points");
        let mut c_points = Element::new("g")
            .attr("transform", svg::translate(SIDE_MARGIN, COMPLEXITY_AXIS_Y))
            .attr("id", "c-points");
        let mut lines = Element::new("g")
            .attr("transform", svg::translate(SIDE_MARGIN, WORDINESS_AXIS_Y))
            .attr("id", "spectrum-lines");

        for (i, point) in self.points.iter().enumerate() {
            let lit = highlighted(point);
            let clicked = self.committed == Some(i);

            if let Some(wx) = point.wordiness_x {
                w_points = w_points.child(story_circle(point, wx, lit, clicked));
                lines = lines.child(story_line(point, wx, lit, clicked));
            }
            c_points = c_points.child(story_circle(point, point.complexity_x, lit, clicked));
        }
        [w_points, c_points, lines]
    }
}

/// Degenerate domains (all zero) pin every point to the axis origin
fn scale_or_zero(scale: &LinearScale, value: f64) -> f64 {
    let (d0, d1) = scale.domain();
    if d0 == d1 {
        0.0
    } else {
        scale.apply(value)
    }
}

/// d3-style bottom axis: a domain path and labelled ticks
fn axis(id: &str, y: f64, scale: &LinearScale) -> Element {
    let (r0, r1) = scale.range();
    let ticks = scale.tick_labels(TICK_COUNT).into_iter().map(|(value, label)| {
        Element::new("g")
            .class("tick")
            .attr("transform", svg::translate(scale_or_zero(scale, value), 0.0))
            .child(Element::new("line").attr("stroke", "currentColor").num("y2", 6.0))
            .child(
                Element::new("text")
                    .attr("fill", "currentColor")
                    .num("y", 9.0)
                    .attr("dy", "0.71em")
                    .text(label),
            )
    });

    Element::new("g")
        .class("axis")
        .attr("id", id.to_string())
        .attr("transform", svg::translate(SIDE_MARGIN, y))
        .attr("fill", "none")
        .attr("font-size", "10")
        .attr("text-anchor", "middle")
        .child(
            Element::new("path")
                .class("domain")
                .attr("stroke", "currentColor")
                .attr("d", format!("M{},6V0H{}V6", svg::num(r0), svg::num(r1))),
        )
        .children(ticks)
}

fn story_classes(point: &SpectrumPoint, clicked: bool) -> String {
    if clicked {
        format!("{} clicked", point.rank.as_str())
    } else {
        point.rank.as_str().to_string()
    }
}

fn story_circle(point: &SpectrumPoint, cx: f64, lit: bool, clicked: bool) -> Element {
    let circle = Element::new("circle")
        .class(story_classes(point, clicked))
        .attr("data-select", point.title.clone())
        .attr("data-hover", format!("story:{}", point.title))
        .num("cx", cx)
        .num("cy", 0.0);
    if lit {
        circle
            .num("r", HIGHLIGHT_RADIUS)
            .num("stroke-width", HIGHLIGHT_STROKE_WIDTH)
            .attr("style", format!("fill: {0}; stroke: {0}", HIGHLIGHT_COLOR))
    } else {
        circle
            .num("r", POINT_RADIUS)
            .attr("style", format!("fill: {}", point.rank.color()))
    }
}

fn story_line(point: &SpectrumPoint, wx: f64, lit: bool, clicked: bool) -> Element {
    let (stroke, width) = if lit {
        (HIGHLIGHT_COLOR, HIGHLIGHT_STROKE_WIDTH)
    } else {
        (point.rank.color(), 1.0)
    };
    Element::new("line")
        .class(story_classes(point, clicked))
        .attr("data-select", point.title.clone())
        .attr("data-hover", format!("story:{}", point.title))
        .num("x1", wx)
        .num("y1", 0.0)
        .num("x2", point.complexity_x)
        .num("y2", COMPLEXITY_AXIS_Y - WORDINESS_AXIS_Y)
        .num("stroke-width", width)
        .attr("style", format!("stroke: {}", stroke))
}

fn tip(y: f64, x: f64, text: &str) -> Element {
    Element::new("text")
        .class("text tip")
        .num("x", x)
        .num("y", y)
        .text(text)
}

impl Widget for SpectrumWidget {
    fn name(&self) -> &'static str {
        "spectrum"
    }

    fn update(&mut self, story: &StoryRecord, _scores: &ScoreTables) {
        self.committed = self.points.iter().position(|p| p.title == story.title);
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let committed = self.committed();
        // hovering the committed story adds nothing
        let hovered = ctx
            .hovered_story()
            .and_then(|title| self.point(title))
            .filter(|p| committed.map_or(true, |c| c.title != p.title));

        let highlighted = |p: &SpectrumPoint| {
            committed.map_or(false, |c| c.title == p.title)
                || hovered.map_or(false, |h| h.title == p.title)
        };
        let [w_points, c_points, mut lines] = self.render_points(&highlighted);
        if !ctx.lines_visible {
            lines = lines.attr("display", "none");
        }

        let committed_tip = match committed {
            Some(p) => tip(COMMITTED_TIP_Y, p.tip_x(), &p.title),
            None => tip(COMMITTED_TIP_Y, 0.0, ""),
        };
        let hover_tip = match hovered {
            Some(p) => tip(HOVER_TIP_Y, p.tip_x(), &p.title),
            None => tip(HOVER_TIP_Y, 0.0, ""),
        };

        let checkbox_fill = if ctx.lines_visible { "azure" } else { "goldenrod" };

        let body = Element::new("g")
            .attr("transform", svg::translate(self.surface.margin.left, self.surface.margin.top))
            .children(self.axes.iter().cloned())
            .child(w_points)
            .child(c_points)
            .child(lines)
            .child(committed_tip)
            .child(hover_tip)
            .child(
                Element::new("circle")
                    .attr("id", "checkbox")
                    .attr("data-toggle", "lines")
                    .num("cx", SIDE_MARGIN + 5.0)
                    .num("cy", 10.0)
                    .num("r", 7.0)
                    .attr("style", format!("fill: {}", checkbox_fill)),
            )
            .child(
                Element::new("text")
                    .class("text")
                    .attr("id", "checkbox-text")
                    .attr("data-toggle", "lines")
                    .num("x", SIDE_MARGIN + 20.0)
                    .num("y", 16.0)
                    .text("Hide lines"),
            )
            .child(
                Element::new("text")
                    .class("text")
                    .attr("id", "spectrum-instructions")
                    .num("x", self.surface.width / 2.0)
                    .num("y", 5.0)
                    .text("Click data points to see book diagram"),
            );

        Element::new("svg")
            .attr("id", "spectrum-svg")
            .num("width", self.surface.outer_width())
            .num("height", self.surface.outer_height())
            .child(body)
            .render()
    }
}
