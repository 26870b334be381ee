//! Word difficulty lookup table
//!
//! Loaded from a CSV with at least the columns `Word` and `I_Zscore`.
//! Scores run roughly from -1 (easy) to 1 (hard). Other columns are ignored.
//! Rows without a usable score are dropped, so those words read as unlisted.

use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

const WORD_COLUMN: &str = "Word";
const SCORE_COLUMN: &str = "I_Zscore";

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::InvalidInput(format!("difficulty table has no '{}' column", name)))
}

/// Mapping from word to difficulty score
#[derive(Debug, Clone, Default)]
pub struct DifficultyTable {
    scores: HashMap<String, f64>,
}

impl DifficultyTable {
    /// Parse a difficulty table from CSV text
    ///
    /// A word listed twice keeps its last score. Rows that are short, or
    /// whose `I_Zscore` is empty or non-numeric, are skipped. Malformed CSV
    /// or a missing `Word`/`I_Zscore` header is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        let word_at = column(headers, WORD_COLUMN)?;
        let score_at = column(headers, SCORE_COLUMN)?;

        let mut scores = HashMap::new();
        let mut skipped = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            let word = record.get(word_at).unwrap_or_default();
            let score = record
                .get(score_at)
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match score {
                Some(score) if !word.is_empty() => {
                    scores.insert(word.to_string(), score);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(
                "Skipped {} difficulty rows without a word or numeric score",
                skipped
            );
        }
        Ok(Self { scores })
    }

    /// Difficulty score of `word`, if listed (exact, case-sensitive match)
    pub fn score(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for DifficultyTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().map(|(w, s)| (w.into(), s)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_required_columns_and_ignores_others() {
        let csv = "Word,Length,I_Zscore,Freq\nslow,4,0.2,10\nran,3,-0.1,50\n";
        let table = DifficultyTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.score("slow"), Some(0.2));
        assert_eq!(table.score("ran"), Some(-0.1));
        assert_eq!(table.score("Slow"), None);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let csv = "Word,I_Zscore\nfox,0.1\nfox,0.4\n";
        let table = DifficultyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.score("fox"), Some(0.4));
    }

    #[test]
    fn test_non_numeric_score_is_skipped() {
        let csv = "Word,I_Zscore\nfox,high\nowl,NaN\nslow,0.2\n";
        let table = DifficultyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.score("fox"), None);
        assert_eq!(table.score("owl"), None);
        assert_eq!(table.score("slow"), Some(0.2));
    }

    #[test]
    fn test_empty_score_is_skipped() {
        let csv = "Word,I_Zscore\nfox,\nslow,0.2\n";
        let table = DifficultyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.score("fox"), None);
        assert_eq!(table.score("slow"), Some(0.2));
    }

    #[test]
    fn test_short_row_is_skipped() {
        let csv = "Word,Length,I_Zscore\nfox,3\nslow,4,0.2\n";
        let table = DifficultyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.score("fox"), None);
        assert_eq!(table.score("slow"), Some(0.2));
    }

    #[test]
    fn test_missing_score_column_is_an_error() {
        let csv = "Word,Length\nfox,3\n";
        let err = DifficultyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_missing_word_column_is_an_error() {
        let csv = "Term,I_Zscore\nfox,0.3\n";
        let err = DifficultyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let csv: &[u8] = b"Word,I_Zscore\n\xff\xfe,0.3\n";
        let err = DifficultyTable::from_reader(csv).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
        let message = err.to_string();
        assert!(message.starts_with("Difficulty table: "));
        assert!(!message.contains("CSV error: CSV"));
    }
}
