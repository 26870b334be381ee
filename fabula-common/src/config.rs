//! Configuration loading and resolution
//!
//! Bootstrap configuration is a small optional TOML file. Every field has a
//! built-in default, so the dashboard starts with no file at all.
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (applied via [`ConfigOverrides`])
//! 2. Environment variables (handled by the binary's argument parser)
//! 3. TOML configuration file (`--config`, else `<config dir>/fabula/config.toml`)
//! 4. Built-in defaults (code constants)

use crate::corpus::CorpusLayout;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    ///
    /// Default: 5730
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Path to the fairy tale corpus text
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Path to the word difficulty CSV (`Word`, `I_Zscore` columns)
    #[serde(default = "default_difficulty_path")]
    pub difficulty_path: PathBuf,

    /// Optional part-of-speech lexicon (`word TAG [TAG...]` per line)
    ///
    /// Falls back to the built-in closed-class lexicon when absent
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,

    /// Corpus splitting and title pairing
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Widget container bounds
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the corpus text is cut into stories
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Number of consecutive newlines separating two stories
    #[serde(default = "default_delimiter_newlines")]
    pub delimiter_newlines: usize,

    /// First story chunk (inclusive)
    #[serde(default = "default_story_start")]
    pub story_start: usize,

    /// Last story chunk (exclusive)
    #[serde(default = "default_story_end")]
    pub story_end: usize,

    /// Ordered story titles; the built-in list is used when absent
    #[serde(default)]
    pub titles: Option<Vec<String>>,
}

/// Container widths for the widgets, in pixels
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_diagram_width")]
    pub diagram_width: f64,

    #[serde(default = "default_spectrum_width")]
    pub spectrum_width: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_port() -> u16 {
    5730
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/englishfairytales.txt")
}

fn default_difficulty_path() -> PathBuf {
    PathBuf::from("data/WordDifficulty.csv")
}

fn default_delimiter_newlines() -> usize {
    8
}

fn default_story_start() -> usize {
    3
}

fn default_story_end() -> usize {
    46
}

fn default_diagram_width() -> f64 {
    640.0
}

fn default_spectrum_width() -> f64 {
    900.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            delimiter_newlines: default_delimiter_newlines(),
            story_start: default_story_start(),
            story_end: default_story_end(),
            titles: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            diagram_width: default_diagram_width(),
            spectrum_width: default_spectrum_width(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            corpus_path: default_corpus_path(),
            difficulty_path: default_difficulty_path(),
            lexicon_path: None,
            corpus: CorpusConfig::default(),
            layout: LayoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CorpusConfig {
    /// Splitting rules and title list for the loader
    pub fn layout(&self) -> CorpusLayout {
        let titles = match &self.titles {
            Some(titles) => titles.clone(),
            None => crate::corpus::DEFAULT_TITLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        };
        CorpusLayout {
            delimiter_newlines: self.delimiter_newlines,
            story_start: self.story_start,
            story_end: self.story_end,
            titles,
        }
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named on the command line or in the environment
    Explicit(PathBuf),
    /// File found in the platform config directory
    Default(PathBuf),
    /// Default-location file that failed to load; built-in defaults used
    Ignored { path: PathBuf, reason: String },
    /// No file; built-in defaults only
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{}", path.display()),
            ConfigSource::Default(path) => write!(f, "{} (default location)", path.display()),
            ConfigSource::Ignored { path, reason } => {
                write!(f, "built-in defaults (ignored {}: {})", path.display(), reason)
            }
            ConfigSource::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration with graceful degradation
    ///
    /// An explicitly named file must exist and parse. The platform default
    /// file is optional; if it is malformed, built-in defaults are used and
    /// the returned source says why so the caller can log it once tracing
    /// is up.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file {:?}: {}", path, e))
            })?;
            let config = Self::from_toml_str(&content)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            let parsed = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|content| Self::from_toml_str(&content));
            return Ok(match parsed {
                Ok(config) => (config, ConfigSource::Default(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Ignored {
                        path,
                        reason: e.to_string(),
                    },
                ),
            });
        }

        Ok((Self::default(), ConfigSource::BuiltIn))
    }

    /// Apply command-line overrides (highest priority)
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(path) = overrides.corpus_path {
            self.corpus_path = path;
        }
        if let Some(path) = overrides.difficulty_path {
            self.difficulty_path = path;
        }
        if overrides.lexicon_path.is_some() {
            self.lexicon_path = overrides.lexicon_path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }

    /// Socket address string for the HTTP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub corpus_path: Option<PathBuf>,
    pub difficulty_path: Option<PathBuf>,
    pub lexicon_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Platform config file location (`~/.config/fabula/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fabula").join("config.toml"))
}
