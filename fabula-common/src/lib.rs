//! # Fabula Common Library
//!
//! Shared code for the Fabula dashboard:
//! - Corpus splitting and loading
//! - Word difficulty table
//! - Lexer and part-of-speech tagger
//! - Story metrics (complexity, wordiness) and score tables
//! - Quantile and linear scales
//! - Configuration loading
//! - Event types for the notification stream

pub mod config;
pub mod corpus;
pub mod difficulty;
pub mod error;
pub mod events;
pub mod index;
pub mod lexer;
pub mod loader;
pub mod metrics;
pub mod scale;
pub mod tagger;

pub use error::{Error, Result};
pub use index::{CorpusIndex, ScoreEntry, ScoreTables};
pub use metrics::{wordiness, StoryRecord, Wordiness};
