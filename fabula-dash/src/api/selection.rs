//! Committed selection and spectrum line toggle
//!
//! Both take the dashboard write lock, so concurrent commits are
//! serialized and the last one wins. Each change is announced over SSE.

use crate::{ApiError, AppState};
use axum::{extract::State, Json};
use fabula_common::events::DashboardEvent;
use fabula_common::wordiness;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// POST /api/select request
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub title: String,
}

/// POST /api/select response
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub title: String,
    pub complexity: f64,
    /// `null` when the story has no verbs
    pub wordiness: Option<f64>,
}

/// POST /api/select
///
/// Commits `title` and updates every widget. Unknown titles are 404 and
/// leave the current selection untouched.
pub async fn select_story(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, ApiError> {
    let response = {
        let mut dashboard = state.dashboard()?.write().await;
        let story = dashboard.select(&request.title)?;
        SelectResponse {
            title: story.title.clone(),
            complexity: story.complexity,
            wordiness: wordiness(story).value(),
        }
    };

    info!("Selected story: {}", response.title);
    state
        .sse
        .broadcast_lossy(DashboardEvent::selection_changed(response.title.clone()));
    Ok(Json(response))
}

/// GET /api/selection response
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub title: Option<String>,
}

/// GET /api/selection
pub async fn get_selection(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let dashboard = state.dashboard()?.read().await;
    Ok(Json(SelectionResponse {
        title: dashboard.selection().map(str::to_string),
    }))
}

/// POST /api/spectrum/lines request and response
#[derive(Debug, Deserialize, Serialize)]
pub struct LinesVisibility {
    pub visible: bool,
}

/// POST /api/spectrum/lines
///
/// Shows or hides the spectrum's connecting lines. Setting the current
/// value again is accepted and not announced.
pub async fn set_spectrum_lines(
    State(state): State<AppState>,
    Json(request): Json<LinesVisibility>,
) -> Result<Json<LinesVisibility>, ApiError> {
    let changed = state
        .dashboard()?
        .write()
        .await
        .set_lines_visible(request.visible);

    if changed {
        debug!("Spectrum lines visible: {}", request.visible);
        state
            .sse
            .broadcast_lossy(DashboardEvent::lines_toggled(request.visible));
    }
    Ok(Json(LinesVisibility {
        visible: request.visible,
    }))
}
