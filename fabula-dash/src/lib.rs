//! fabula-dash library - fairy-tale readability dashboard
//!
//! Serves four coordinated widgets (book diagram, spectrum, story list and
//! legend) over HTTP. All rendering happens server side; the page swaps in
//! widget markup and reports clicks and hovers back to the API.

use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod dashboard;
pub mod error;
pub mod sse;
pub mod svg;
pub mod widgets;

pub use dashboard::{Dashboard, SelectionNotifier};
pub use error::ApiError;
pub use sse::SseBroadcaster;

/// Outcome of the startup load chain
pub enum LoadState {
    Ready(RwLock<Dashboard>),
    /// Corpus could not be loaded; the message is shown to the user
    Failed(String),
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub load: Arc<LoadState>,
    /// Committed-state notifications for connected browsers
    pub sse: SseBroadcaster,
}

impl AppState {
    /// State for a successfully loaded corpus
    pub fn ready(dashboard: Dashboard) -> Self {
        Self {
            load: Arc::new(LoadState::Ready(RwLock::new(dashboard))),
            sse: SseBroadcaster::default(),
        }
    }

    /// State after a failed load
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            load: Arc::new(LoadState::Failed(error.into())),
            sse: SseBroadcaster::default(),
        }
    }

    /// The dashboard, or 503 with the load error
    pub fn dashboard(&self) -> Result<&RwLock<Dashboard>, ApiError> {
        match self.load.as_ref() {
            LoadState::Ready(dashboard) => Ok(dashboard),
            LoadState::Failed(error) => Err(ApiError::Unavailable(error.clone())),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let dashboard = Router::new()
        .route("/api/status", get(api::get_status))
        .route("/api/stories", get(api::list_stories))
        .route("/api/widgets/:name", get(api::get_widget))
        .route("/api/select", post(api::select_story))
        .route("/api/selection", get(api::get_selection))
        .route("/api/spectrum/lines", post(api::set_spectrum_lines))
        .route("/api/events", get(api::event_stream))
        .route("/api/buildinfo", get(api::get_build_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/style.css", get(api::serve_style_css))
        .merge(api::health_routes());

    Router::new()
        .merge(dashboard)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
