//! Corpus index and derived score tables
//!
//! Both are built once after load and only read afterwards.

use crate::metrics::{wordiness, StoryRecord, Wordiness};
use crate::{Error, Result};
use std::collections::HashMap;

/// Stories keyed by title, iterated in corpus order
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    stories: Vec<StoryRecord>,
    by_title: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Index records in the given order; titles must be unique
    pub fn from_records(stories: Vec<StoryRecord>) -> Result<Self> {
        let mut by_title = HashMap::with_capacity(stories.len());
        for (i, story) in stories.iter().enumerate() {
            if by_title.insert(story.title.clone(), i).is_some() {
                return Err(Error::Corpus(format!("duplicate title: {}", story.title)));
            }
        }
        Ok(Self { stories, by_title })
    }

    pub fn get(&self, title: &str) -> Option<&StoryRecord> {
        self.by_title.get(title).map(|&i| &self.stories[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoryRecord> {
        self.stories.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.stories.iter().map(|s| s.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

/// One row of the score tables
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub title: String,
    pub complexity: f64,
    pub wordiness: Wordiness,
}

/// Title → complexity and title → wordiness, in corpus order
#[derive(Debug, Clone, Default)]
pub struct ScoreTables {
    entries: Vec<ScoreEntry>,
    by_title: HashMap<String, usize>,
}

impl ScoreTables {
    /// Derive both tables from the index
    pub fn from_index(index: &CorpusIndex) -> Self {
        let entries: Vec<ScoreEntry> = index
            .iter()
            .map(|story| ScoreEntry {
                title: story.title.clone(),
                complexity: story.complexity,
                wordiness: wordiness(story),
            })
            .collect();
        let by_title = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.title.clone(), i))
            .collect();
        Self { entries, by_title }
    }

    pub fn wordiness(&self, title: &str) -> Option<Wordiness> {
        self.entry(title).map(|e| e.wordiness)
    }

    pub fn entry(&self, title: &str) -> Option<&ScoreEntry> {
        self.by_title.get(title).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn complexities(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.complexity)
    }

    /// Largest complexity, 0 for an empty corpus
    pub fn max_complexity(&self) -> f64 {
        self.complexities().fold(0.0, f64::max)
    }

    /// Largest defined wordiness, 0 when none is defined
    pub fn max_wordiness(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|e| e.wordiness.value())
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, complexity: f64, descriptors: usize, verbs: usize) -> StoryRecord {
        StoryRecord {
            title: title.to_string(),
            words: Vec::new(),
            descriptors: vec!["fine".to_string(); descriptors],
            verbs: vec!["went".to_string(); verbs],
            complexity,
            token_count: 10,
        }
    }

    #[test]
    fn test_index_keeps_corpus_order() {
        let index = CorpusIndex::from_records(vec![
            record("B", 0.1, 1, 1),
            record("A", 0.2, 1, 1),
        ])
        .unwrap();
        assert_eq!(index.titles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(index.get("A").unwrap().complexity, 0.2);
        assert!(index.get("C").is_none());
    }

    #[test]
    fn test_duplicate_titles_rejected() {
        let err = CorpusIndex::from_records(vec![record("A", 0.1, 1, 1), record("A", 0.2, 1, 1)])
            .unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_score_tables_cover_every_story() {
        let index = CorpusIndex::from_records(vec![
            record("A", 0.1, 3, 2),
            record("B", 0.4, 2, 0),
            record("C", 0.3, 1, 4),
        ])
        .unwrap();
        let scores = ScoreTables::from_index(&index);

        assert_eq!(scores.len(), index.len());
        assert_eq!(scores.wordiness("A"), Some(Wordiness::Ratio(1.5)));
        assert_eq!(scores.wordiness("B"), Some(Wordiness::Undefined));
        assert_eq!(scores.max_complexity(), 0.4);
        assert_eq!(scores.max_wordiness(), 1.5);
    }
}
