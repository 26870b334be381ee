//! fabula-dash - fairy-tale readability dashboard
//!
//! Loads the story corpus once at startup, then serves the dashboard page
//! and its widgets over HTTP.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use fabula_common::config::{ConfigOverrides, ConfigSource, LoggingConfig, TomlConfig};
use fabula_common::loader::load_corpus;
use fabula_dash::{build_router, AppState, Dashboard};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for fabula-dash
#[derive(Parser, Debug)]
#[command(name = "fabula-dash")]
#[command(about = "Readability dashboard for a fairy-tale corpus")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "FABULA_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "FABULA_PORT")]
    port: Option<u16>,

    /// Corpus text file
    #[arg(long, env = "FABULA_CORPUS")]
    corpus: Option<PathBuf>,

    /// Word difficulty CSV
    #[arg(long, env = "FABULA_DIFFICULTY")]
    difficulty: Option<PathBuf>,

    /// Part-of-speech lexicon extending the built-in one
    #[arg(long, env = "FABULA_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = config.with_overrides(ConfigOverrides {
        port: args.port,
        corpus_path: args.corpus,
        difficulty_path: args.difficulty,
        lexicon_path: args.lexicon,
        log_level: args.log_level,
    });

    init_tracing(&config.logging)?;

    // Build identification first, before the corpus load
    info!(
        "Starting Fabula dashboard (fabula-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &source {
        ConfigSource::Ignored { .. } => warn!("Configuration: {}", source),
        _ => info!("Configuration: {}", source),
    }

    let state = match load_corpus(&config).await {
        Ok(corpus) => AppState::ready(Dashboard::new(corpus, &config.layout)),
        Err(e) => {
            error!("Failed to load corpus: {}", e);
            AppState::failed(e.to_string())
        }
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fabula-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over the configured level. With `[logging] file` set,
/// output is appended to that file instead of stderr.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(logging.file.is_none()),
        )
        .init();
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
