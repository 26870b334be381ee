//! Corpus load pipeline
//!
//! One chain, run to completion before the dashboard is built:
//! read text → read difficulty table → split → lex + tag → build records.

use crate::config::TomlConfig;
use crate::corpus::CorpusLayout;
use crate::difficulty::DifficultyTable;
use crate::index::{CorpusIndex, ScoreTables};
use crate::lexer::lex;
use crate::metrics::{build_story_record, wordiness};
use crate::tagger::{Lexicon, LexiconTagger, Tagger};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything the widgets need, built once
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub index: CorpusIndex,
    pub scores: ScoreTables,
}

/// Read the configured files and build the corpus
pub async fn load_corpus(config: &TomlConfig) -> Result<LoadedCorpus> {
    let text = read_text(&config.corpus_path).await?;
    info!(
        "Read corpus from {:?} ({} bytes)",
        config.corpus_path,
        text.len()
    );

    let table_bytes = tokio::fs::read(&config.difficulty_path)
        .await
        .map_err(|source| Error::Read {
            path: config.difficulty_path.clone(),
            source,
        })?;
    let difficulty = DifficultyTable::from_reader(table_bytes.as_slice())?;
    info!(
        "Loaded {} difficulty scores from {:?}",
        difficulty.len(),
        config.difficulty_path
    );

    let lexicon = match &config.lexicon_path {
        Some(path) => {
            let lexicon = Lexicon::builtin_extended(&read_text(path).await?)?;
            info!("Loaded lexicon from {:?} ({} entries)", path, lexicon.len());
            lexicon
        }
        None => {
            info!("Using built-in lexicon");
            Lexicon::builtin()
        }
    };
    let tagger = LexiconTagger::new(lexicon);

    build_corpus(&text, &config.corpus.layout(), &tagger, &difficulty)
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Split, tag and measure every story in `text`
pub fn build_corpus(
    text: &str,
    layout: &CorpusLayout,
    tagger: &dyn Tagger,
    difficulty: &DifficultyTable,
) -> Result<LoadedCorpus> {
    let normalized = text.replace("\r\n", "\n");
    let stories = layout.split(&normalized)?;

    let records: Vec<_> = stories
        .iter()
        .map(|raw| {
            let tokens = tagger.tag(&lex(raw.text));
            let record = build_story_record(raw.title.as_str(), &tokens, difficulty);
            debug!(
                title = %record.title,
                tokens = record.token_count,
                listed = record.words.len(),
                complexity = record.complexity,
                "Built story record"
            );
            if !wordiness(&record).is_defined() {
                warn!(
                    "Story '{}' has no verbs; wordiness is undefined and it is left off the wordiness scale",
                    record.title
                );
            }
            record
        })
        .collect();

    let index = CorpusIndex::from_records(records)?;
    let scores = ScoreTables::from_index(&index);
    info!("Built metrics for {} stories", index.len());

    Ok(LoadedCorpus { index, scores })
}
