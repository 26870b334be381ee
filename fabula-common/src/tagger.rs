//! Part-of-speech tagging
//!
//! [`Tagger`] is the seam between the metrics builder and whatever assigns
//! Penn Treebank tags. [`LexiconTagger`] is a lexicon lookup followed by a
//! fixed list of transformation rules in the Brill style: every token gets
//! its lexicon's preferred tag (unknown words default to `NN`), then the
//! rules below correct common mistakes using suffixes and the previous token.

use crate::{Error, Result};
use std::collections::HashMap;

const BUILTIN_LEXICON: &str = include_str!("builtin_lexicon.txt");

/// A (word, part-of-speech tag) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Assigns part-of-speech tags to a token sequence
pub trait Tagger: Send + Sync {
    /// Tag `words`; the output has one entry per input word, in order
    fn tag(&self, words: &[String]) -> Vec<TaggedToken>;
}

/// Word to candidate tags, most likely tag first
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Parse `word TAG [TAG...]` lines; blank lines and `#` comments are skipped
    pub fn parse(text: &str) -> Result<Self> {
        let mut lexicon = Self::default();
        lexicon.extend_from_str(text)?;
        Ok(lexicon)
    }

    /// The closed-class lexicon compiled into the binary
    pub fn builtin() -> Self {
        // The compiled-in text is covered by tests; an empty lexicon only
        // degrades tagging to the NN default.
        Self::parse(BUILTIN_LEXICON).unwrap_or_default()
    }

    /// Built-in lexicon extended (and overridden) by the entries in `text`
    pub fn builtin_extended(text: &str) -> Result<Self> {
        let mut lexicon = Self::builtin();
        lexicon.extend_from_str(text)?;
        Ok(lexicon)
    }

    fn extend_from_str(&mut self, text: &str) -> Result<()> {
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default();
            let tags: Vec<String> = fields.map(str::to_string).collect();
            if tags.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "lexicon line {}: '{}' has no tag",
                    line_no + 1,
                    word
                )));
            }
            self.entries.insert(word.to_string(), tags);
        }
        Ok(())
    }

    /// Candidate tags for `word`, trying the exact form then lowercase
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lexicon lookup plus transformation rules
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Lexicon,
}

impl LexiconTagger {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, words: &[String]) -> Vec<TaggedToken> {
        let mut tags: Vec<String> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let mut tag = self
                .lexicon
                .lookup(word)
                .and_then(|t| t.first().cloned())
                .unwrap_or_else(|| "NN".to_string());

            // determiner followed by a verb form: the "verb" is a noun
            if i > 0 && tags[i - 1] == "DT" && matches!(tag.as_str(), "VBD" | "VBP" | "VB") {
                tag = "NN".to_string();
            }
            // numerals
            if tag.starts_with('N') && word.parse::<f64>().is_ok() {
                tag = "CD".to_string();
            }
            // past participle
            if tag.starts_with('N') && word.ends_with("ed") {
                tag = "VBN".to_string();
            }
            if word.ends_with("ly") {
                tag = "RB".to_string();
            }
            if tag.starts_with("NN") && word.ends_with("al") {
                tag = "JJ".to_string();
            }
            // "would" + noun reads as a base-form verb
            if i > 0 && tag.starts_with("NN") && words[i - 1].to_lowercase() == "would" {
                tag = "VB".to_string();
            }
            if tag == "NN" && word.ends_with('s') {
                tag = "NNS".to_string();
            }
            // gerund
            if tag.starts_with("NN") && word.ends_with("ing") {
                tag = "VBG".to_string();
            }

            tags.push(tag);
        }

        words
            .iter()
            .zip(tags)
            .map(|(word, tag)| TaggedToken::new(word.clone(), tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn tags_of(tagger: &LexiconTagger, text: &str) -> Vec<String> {
        tagger.tag(&words(text)).into_iter().map(|t| t.tag).collect()
    }

    #[test]
    fn test_builtin_lexicon_parses() {
        let lexicon = Lexicon::parse(BUILTIN_LEXICON).unwrap();
        assert!(lexicon.len() > 100);
        assert_eq!(lexicon.lookup("the").unwrap()[0], "DT");
    }

    #[test]
    fn test_lookup_falls_back_to_lowercase() {
        let lexicon = Lexicon::parse("the DT\n").unwrap();
        assert_eq!(lexicon.lookup("The").unwrap()[0], "DT");
    }

    #[test]
    fn test_line_without_tag_is_rejected() {
        assert!(matches!(Lexicon::parse("# comment\nlonely\n"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_words_default_to_noun() {
        let tagger = LexiconTagger::new(Lexicon::default());
        assert_eq!(tags_of(&tagger, "beanstalk"), vec!["NN"]);
    }

    #[test]
    fn test_suffix_rules() {
        let tagger = LexiconTagger::new(Lexicon::default());
        assert_eq!(
            tags_of(&tagger, "quickly magical giants spinning jumped 42"),
            vec!["RB", "JJ", "NNS", "VBG", "VBN", "CD"]
        );
    }

    #[test]
    fn test_determiner_turns_verb_into_noun() {
        let lexicon = Lexicon::parse("the DT\nrun VB NN\n").unwrap();
        let tagger = LexiconTagger::new(lexicon);
        assert_eq!(tags_of(&tagger, "the run"), vec!["DT", "NN"]);
    }

    #[test]
    fn test_would_makes_following_noun_a_verb() {
        let lexicon = Lexicon::parse("would MD\n").unwrap();
        let tagger = LexiconTagger::new(lexicon);
        assert_eq!(tags_of(&tagger, "would sup"), vec!["MD", "VB"]);
    }

    #[test]
    fn test_would_applies_to_every_noun_tag() {
        let lexicon = Lexicon::parse("would MD\ngiants NNS\nJack NNP\n").unwrap();
        let tagger = LexiconTagger::new(lexicon);
        assert_eq!(tags_of(&tagger, "would giants"), vec!["MD", "VB"]);
        assert_eq!(tags_of(&tagger, "would Jack"), vec!["MD", "VB"]);
    }

    #[test]
    fn test_builtin_extended_overrides_entries() {
        let lexicon = Lexicon::builtin_extended("the JJ\nbeanstalk NN\n").unwrap();
        assert_eq!(lexicon.lookup("the").unwrap()[0], "JJ");
        assert!(lexicon.lookup("beanstalk").is_some());
        assert!(Lexicon::builtin_extended("lonely\n").is_err());
    }

    #[test]
    fn test_output_preserves_words_and_length() {
        let tagger = LexiconTagger::default();
        let input = words("She went to the well");
        let tagged = tagger.tag(&input);
        assert_eq!(tagged.len(), input.len());
        assert_eq!(tagged[1], TaggedToken::new("went", "VBD"));
    }
}
