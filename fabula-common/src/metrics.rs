//! Per-story metrics: complexity and wordiness
//!
//! **Complexity** is the sum of the non-negative difficulty scores of the
//! story's listed words divided by the number of tagged tokens in the story.
//! Negative ("easy") scores add nothing to the sum but the word still counts
//! toward the story's word list.
//!
//! **Wordiness** is descriptors / verbs. It is derived on demand from a
//! [`StoryRecord`] by [`wordiness`] and is [`Wordiness::Undefined`] for a
//! story with no verbs.

use crate::difficulty::DifficultyTable;
use crate::tagger::TaggedToken;
use serde::Serialize;
use std::fmt;

/// How a tag counts toward wordiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosClass {
    /// Adjective (`JJ`) or adverb (`RB`)
    Descriptor,
    /// Any verb form (`VB`, `VBD`, `VBG`, `VBN`, `VBP`, `VBZ`)
    Verb,
    Other,
}

impl PosClass {
    pub fn of(tag: &str) -> Self {
        match tag {
            "JJ" | "RB" => PosClass::Descriptor,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => PosClass::Verb,
            _ => PosClass::Other,
        }
    }
}

/// Metrics and word lists for one story; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryRecord {
    pub title: String,
    /// Tokens found in the difficulty table, in story order
    pub words: Vec<String>,
    /// Listed tokens tagged as adjective or adverb
    pub descriptors: Vec<String>,
    /// Listed tokens tagged with a verb form
    pub verbs: Vec<String>,
    pub complexity: f64,
    /// Number of tagged tokens, listed or not (the complexity denominator)
    pub token_count: usize,
}

impl StoryRecord {
    /// Recompute complexity from the stored word list
    pub fn recompute_complexity(&self, difficulty: &DifficultyTable) -> f64 {
        let sum: f64 = self
            .words
            .iter()
            .filter_map(|w| difficulty.score(w))
            .filter(|s| *s >= 0.0)
            .sum();
        ratio(sum, self.token_count)
    }
}

/// Build a story's record from its tagged tokens
pub fn build_story_record(
    title: impl Into<String>,
    tokens: &[TaggedToken],
    difficulty: &DifficultyTable,
) -> StoryRecord {
    let mut words = Vec::new();
    let mut descriptors = Vec::new();
    let mut verbs = Vec::new();
    let mut sum = 0.0;

    for token in tokens {
        let Some(score) = difficulty.score(&token.word) else {
            continue;
        };
        words.push(token.word.clone());
        if score >= 0.0 {
            sum += score;
        }
        match PosClass::of(&token.tag) {
            PosClass::Descriptor => descriptors.push(token.word.clone()),
            PosClass::Verb => verbs.push(token.word.clone()),
            PosClass::Other => {}
        }
    }

    StoryRecord {
        title: title.into(),
        words,
        descriptors,
        verbs,
        complexity: ratio(sum, tokens.len()),
        token_count: tokens.len(),
    }
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Descriptor-to-verb ratio of a story
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wordiness {
    Ratio(f64),
    /// The story has no verbs
    Undefined,
}

impl Wordiness {
    pub fn value(self) -> Option<f64> {
        match self {
            Wordiness::Ratio(r) => Some(r),
            Wordiness::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Wordiness::Ratio(_))
    }
}

impl fmt::Display for Wordiness {
    /// Three decimals, or `n/a` when undefined
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wordiness::Ratio(r) => write!(f, "{:.3}", r),
            Wordiness::Undefined => f.write_str("n/a"),
        }
    }
}

/// Wordiness of a story: descriptors / verbs
pub fn wordiness(story: &StoryRecord) -> Wordiness {
    if story.verbs.is_empty() {
        Wordiness::Undefined
    } else {
        Wordiness::Ratio(story.descriptors.len() as f64 / story.verbs.len() as f64)
    }
}
