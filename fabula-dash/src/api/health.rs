//! Liveness check with the corpus load state

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{AppState, LoadState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` with a loaded corpus, `degraded` after a failed load
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub stories: usize,
    pub widgets: Vec<&'static str>,
}

/// GET /health
///
/// Always 200 while the process serves requests. A failed corpus load shows
/// up as `degraded` with no stories or widgets.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, stories, widgets) = match state.load.as_ref() {
        LoadState::Ready(dashboard) => {
            let dashboard = dashboard.read().await;
            (
                "ok",
                dashboard.stories().len(),
                dashboard.widget_names().collect(),
            )
        }
        LoadState::Failed(_) => ("degraded", 0, Vec::new()),
    };

    Json(HealthResponse {
        status,
        module: "fabula-dash",
        version: env!("CARGO_PKG_VERSION"),
        stories,
        widgets,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
