//! Common error types for Fabula

use thiserror::Error;

/// Common result type for Fabula operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Fabula crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Difficulty table could not be parsed (wraps csv::Error)
    #[error("Difficulty table: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus shape error (story/title misalignment, duplicate titles)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or malformed data value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
