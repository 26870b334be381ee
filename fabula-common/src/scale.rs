//! Scales shared by the widgets
//!
//! - [`QuantileScale`]: sample-quantile thresholds mapping a continuous value
//!   onto a discrete range (used for the easy/medium/hard complexity rank)
//! - [`LinearScale`]: continuous domain to continuous range, with "nice"
//!   tick generation for axes

use crate::index::ScoreTables;
use serde::Serialize;

/// Fill used for hovered or committed data
pub const HIGHLIGHT_COLOR: &str = "#DAA520";

/// Maps values onto `range` by quantiles of a sample domain
///
/// With `n` range values there are `n - 1` thresholds at the `i/n`
/// quantiles of the sorted domain (linear interpolation between order
/// statistics). A value equal to a threshold maps to the upper bucket.
#[derive(Debug, Clone)]
pub struct QuantileScale<T> {
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T: Clone> QuantileScale<T> {
    /// Build from a sample; NaN values are ignored
    ///
    /// `range` must not be empty.
    pub fn new(domain: impl IntoIterator<Item = f64>, range: Vec<T>) -> Self {
        assert!(!range.is_empty(), "quantile scale needs a non-empty range");
        let mut sorted: Vec<f64> = domain.into_iter().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let n = range.len();
        let thresholds = if sorted.is_empty() {
            Vec::new()
        } else {
            (1..n)
                .map(|i| quantile_sorted(&sorted, i, n))
                .collect()
        };
        Self { thresholds, range }
    }

    pub fn apply(&self, value: f64) -> T {
        let idx = self.thresholds.partition_point(|t| *t <= value);
        self.range[idx.min(self.range.len() - 1)].clone()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

/// `num/den`-quantile of an ascending, non-empty sample (R-7 interpolation)
fn quantile_sorted(sorted: &[f64], num: usize, den: usize) -> f64 {
    let h = ((sorted.len() - 1) * num) as f64 / den as f64;
    let i = h.floor() as usize;
    let lo = sorted[i];
    match sorted.get(i + 1) {
        Some(hi) => lo + (hi - lo) * (h - i as f64),
        None => lo,
    }
}

/// Linear map from `domain` to `range`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A degenerate domain maps everything to the middle of the range
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Roughly `count` evenly spaced round values within the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain);
        if count == 0 || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let spec = TickSpec::new(start, stop, count);
        (spec.i1..=spec.i2).map(|i| spec.value(i)).collect()
    }

    /// Decimal places needed to print the ticks of [`ticks`](Self::ticks)
    pub fn tick_precision(&self, count: usize) -> usize {
        let (start, stop) = ordered(self.domain);
        if count == 0 || start == stop || !start.is_finite() || !stop.is_finite() {
            return 0;
        }
        let step = TickSpec::new(start, stop, count).step();
        (-step.abs().log10().floor()).max(0.0) as usize
    }

    /// Ticks paired with their printed labels
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let precision = self.tick_precision(count);
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format!("{:.*}", precision, t)))
            .collect()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Tick integers `i1..=i2`; ticks are `i * inc` (or `i / inc` for sub-unit steps)
struct TickSpec {
    i1: i64,
    i2: i64,
    inc: f64,
    inverted: bool,
}

impl TickSpec {
    fn new(start: f64, stop: f64, count: usize) -> Self {
        let e10 = 50f64.sqrt();
        let e5 = 10f64.sqrt();
        let e2 = 2f64.sqrt();

        let step = (stop - start) / count as f64;
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= e10 {
            10.0
        } else if error >= e5 {
            5.0
        } else if error >= e2 {
            2.0
        } else {
            1.0
        };

        if power < 0.0 {
            let inc = 10f64.powf(-power) / factor;
            let mut i1 = (start * inc).round() as i64;
            let mut i2 = (stop * inc).round() as i64;
            if (i1 as f64) / inc < start {
                i1 += 1;
            }
            if (i2 as f64) / inc > stop {
                i2 -= 1;
            }
            Self { i1, i2, inc, inverted: true }
        } else {
            let inc = 10f64.powf(power) * factor;
            let mut i1 = (start / inc).round() as i64;
            let mut i2 = (stop / inc).round() as i64;
            if (i1 as f64) * inc < start {
                i1 += 1;
            }
            if (i2 as f64) * inc > stop {
                i2 -= 1;
            }
            Self { i1, i2, inc, inverted: false }
        }
    }

    fn value(&self, i: i64) -> f64 {
        if self.inverted {
            i as f64 / self.inc
        } else {
            i as f64 * self.inc
        }
    }

    fn step(&self) -> f64 {
        if self.inverted {
            1.0 / self.inc
        } else {
            self.inc
        }
    }
}

/// Complexity bucket of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityRank {
    Easy,
    Medium,
    Hard,
}

impl ComplexityRank {
    pub const ALL: [ComplexityRank; 3] = [
        ComplexityRank::Easy,
        ComplexityRank::Medium,
        ComplexityRank::Hard,
    ];

    /// CSS class name
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityRank::Easy => "easy",
            ComplexityRank::Medium => "medium",
            ComplexityRank::Hard => "hard",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ComplexityRank::Easy => "#6eb560",
            ComplexityRank::Medium => "#faf887",
            ComplexityRank::Hard => "#eb4034",
        }
    }
}

/// Quantile rank scale over the complexities of the whole corpus
#[derive(Debug, Clone)]
pub struct ComplexityScale {
    scale: QuantileScale<ComplexityRank>,
}

impl ComplexityScale {
    pub fn new(complexities: impl IntoIterator<Item = f64>) -> Self {
        Self {
            scale: QuantileScale::new(complexities, ComplexityRank::ALL.to_vec()),
        }
    }

    pub fn from_scores(scores: &ScoreTables) -> Self {
        Self::new(scores.complexities())
    }

    pub fn rank(&self, complexity: f64) -> ComplexityRank {
        self.scale.apply(complexity)
    }

    pub fn color(&self, complexity: f64) -> &'static str {
        self.rank(complexity).color()
    }

    pub fn thresholds(&self) -> &[f64] {
        self.scale.thresholds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_splits_evenly() {
        let values: Vec<f64> = (0..9).map(f64::from).collect();
        let scale = ComplexityScale::new(values.iter().copied());
        let mut counts = [0usize; 3];
        for v in &values {
            counts[scale.rank(*v) as usize] += 1;
        }
        assert_eq!(counts, [3, 3, 3]);
    }

    #[test]
    fn test_quantile_threshold_maps_to_upper_bucket() {
        // sample 0..=3: thresholds at 1.0 and 2.0
        let scale = ComplexityScale::new([0.0, 1.0, 2.0, 3.0]);
        assert_eq!(scale.thresholds(), &[1.0, 2.0]);
        assert_eq!(scale.rank(0.999), ComplexityRank::Easy);
        assert_eq!(scale.rank(1.0), ComplexityRank::Medium);
        assert_eq!(scale.rank(2.0), ComplexityRank::Hard);
        assert_eq!(scale.rank(-5.0), ComplexityRank::Easy);
        assert_eq!(scale.rank(50.0), ComplexityRank::Hard);
    }

    #[test]
    fn test_quantile_ignores_input_order() {
        let a = ComplexityScale::new([0.3, 0.1, 0.2, 0.5, 0.4]);
        let b = ComplexityScale::new([0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(a.thresholds(), b.thresholds());
    }

    #[test]
    fn test_empty_domain_uses_first_bucket() {
        let scale = ComplexityScale::new(std::iter::empty());
        assert_eq!(scale.rank(0.7), ComplexityRank::Easy);
    }

    #[test]
    fn test_linear_apply() {
        let scale = LinearScale::new((0.0, 2.0), (0.0, 1260.0));
        assert_eq!(scale.apply(1.0), 630.0);
        assert_eq!(scale.apply(2.0), 1260.0);
        assert_eq!(LinearScale::new((0.0, 0.0), (0.0, 100.0)).apply(3.0), 50.0);
    }

    #[test]
    fn test_ticks_are_round_numbers() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 500.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert!((ticks[3] - 0.3).abs() < 1e-12);
        assert_eq!(scale.tick_precision(10), 1);

        let scale = LinearScale::new((0.0, 2.4), (0.0, 500.0));
        let labels = scale.tick_labels(10);
        assert_eq!(labels.first().unwrap().1, "0.0");
        assert_eq!(labels.last().unwrap().1, "2.4");
    }

    #[test]
    fn test_ticks_for_small_domain() {
        let scale = LinearScale::new((0.0, 0.043), (0.0, 500.0));
        let labels = scale.tick_labels(10);
        assert_eq!(labels[1].1, "0.005");
        assert_eq!(labels.last().unwrap().1, "0.040");
    }
}
