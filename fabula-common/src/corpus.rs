//! Corpus splitting and title pairing
//!
//! The corpus is one text blob. Stories are separated by a run of newlines,
//! a fixed slice of the resulting chunks holds the tales, and each chunk is
//! paired with a title by position. The pairing is validated: a slice whose
//! length differs from the title list is rejected rather than misaligned.

use crate::{Error, Result};
use std::collections::HashSet;

/// Titles of the 43 tales in Joseph Jacobs' *English Fairy Tales*, in order
pub const DEFAULT_TITLES: [&str; 43] = [
    "TOM TIT TOT",
    "THE THREE SILLIES",
    "THE ROSE-TREE",
    "THE OLD WOMAN AND HER PIG",
    "HOW JACK WENT TO SEEK HIS FORTUNE",
    "MR. VINEGAR",
    "NIX NOUGHT NOTHING",
    "JACK HANNAFORD",
    "BINNORIE",
    "MOUSE AND MOUSER",
    "CAP O' RUSHES",
    "TEENY-TINY",
    "JACK AND THE BEANSTALK",
    "THE STORY OF THE THREE LITTLE PIGS",
    "THE MASTER AND HIS PUPIL",
    "TITTY MOUSE AND TATTY MOUSE",
    "JACK AND HIS GOLDEN SNUFF-BOX",
    "THE STORY OF THE THREE BEARS",
    "JACK THE GIANT-KILLER",
    "HENNY-PENNY",
    "CHILDE ROWLAND",
    "MOLLY WHUPPIE",
    "THE RED ETTIN",
    "THE GOLDEN ARM",
    "THE HISTORY OF TOM THUMB",
    "MR. FOX",
    "LAZY JACK",
    "JOHNNY-CAKE",
    "EARL MAR'S DAUGHTER",
    "MR. MIACCA",
    "WHITTINGTON AND HIS CAT",
    "THE STRANGE VISITOR",
    "THE LAIDLY WORM OF SPINDLESTON HEUGH",
    "THE CAT AND THE MOUSE",
    "THE FISH AND THE RING",
    "THE MAGPIE'S NEST",
    "KATE CRACKERNUTS",
    "THE CAULD LAD OF HILTON",
    "THE ASS, THE TABLE, AND THE STICK",
    "FAIRY OINTMENT",
    "THE WELL OF THE WORLD'S END",
    "MASTER OF ALL MASTERS",
    "THE THREE HEADS OF THE WELL",
];

/// Rules for cutting the corpus into titled stories
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusLayout {
    /// Number of consecutive newlines between stories
    pub delimiter_newlines: usize,
    /// First chunk holding a story (inclusive)
    pub story_start: usize,
    /// End of the story chunks (exclusive)
    pub story_end: usize,
    /// Titles matched to the sliced chunks by position
    pub titles: Vec<String>,
}

/// One story's raw text with its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStory<'a> {
    pub title: String,
    pub text: &'a str,
}

impl CorpusLayout {
    /// Cut `text` into stories and pair them with titles
    ///
    /// # Errors
    ///
    /// - `Config` if the delimiter is empty or the slice range is inverted
    /// - `Corpus` if the sliced story count differs from the title count, or
    ///   a title appears twice
    pub fn split<'a>(&self, text: &'a str) -> Result<Vec<RawStory<'a>>> {
        if self.delimiter_newlines == 0 {
            return Err(Error::Config("delimiter_newlines must be at least 1".to_string()));
        }
        if self.story_start > self.story_end {
            return Err(Error::Config(format!(
                "story range {}..{} is inverted",
                self.story_start, self.story_end
            )));
        }

        let delimiter = "\n".repeat(self.delimiter_newlines);
        let chunks: Vec<&str> = text.split(delimiter.as_str()).collect();
        let end = self.story_end.min(chunks.len());
        let start = self.story_start.min(end);
        let stories = &chunks[start..end];

        if stories.len() != self.titles.len() {
            return Err(Error::Corpus(format!(
                "corpus has {} chunks, slice {}..{} yields {} stories but {} titles are configured",
                chunks.len(),
                self.story_start,
                self.story_end,
                stories.len(),
                self.titles.len()
            )));
        }

        let mut seen = HashSet::new();
        for title in &self.titles {
            if !seen.insert(title.as_str()) {
                return Err(Error::Corpus(format!("duplicate title: {}", title)));
            }
        }

        Ok(self
            .titles
            .iter()
            .zip(stories)
            .map(|(title, text)| RawStory {
                title: title.clone(),
                text,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(start: usize, end: usize, titles: &[&str]) -> CorpusLayout {
        CorpusLayout {
            delimiter_newlines: 8,
            story_start: start,
            story_end: end,
            titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn corpus(chunks: &[&str]) -> String {
        chunks.join(&"\n".repeat(8))
    }

    #[test]
    fn test_split_pairs_titles_by_position() {
        let text = corpus(&["preface", "contents", "Once upon a time.", "The end came."]);
        let stories = layout(2, 4, &["FIRST", "SECOND"]).split(&text).unwrap();

        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].title, "FIRST");
        assert_eq!(stories[0].text, "Once upon a time.");
        assert_eq!(stories[1].title, "SECOND");
        assert_eq!(stories[1].text, "The end came.");
    }

    #[test]
    fn test_shorter_runs_do_not_split() {
        let text = format!("a{}b{}c", "\n".repeat(7), "\n".repeat(8));
        let stories = layout(0, 2, &["AB", "C"]).split(&text).unwrap();
        assert_eq!(stories[0].text, format!("a{}b", "\n".repeat(7)));
        assert_eq!(stories[1].text, "c");
    }

    #[test]
    fn test_title_count_mismatch_is_rejected() {
        let text = corpus(&["front", "one", "two"]);
        let err = layout(1, 10, &["ONE", "TWO", "THREE"]).split(&text).unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_duplicate_titles_are_rejected() {
        let text = corpus(&["one", "two"]);
        let err = layout(0, 2, &["SAME", "SAME"]).split(&text).unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_inverted_range_is_config_error() {
        let err = layout(3, 1, &[]).split("text").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
