//! Load status and per-story metrics

use crate::{ApiError, AppState, LoadState};
use axum::{extract::State, Json};
use fabula_common::scale::{ComplexityRank, ComplexityScale};
use fabula_common::{wordiness, StoryRecord};
use serde::Serialize;

/// GET /api/status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// "ready" or "failed"
    pub state: &'static str,
    pub stories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/status
///
/// Always 200; the page uses `state` to decide between the dashboard and
/// the load error.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = match state.load.as_ref() {
        LoadState::Ready(dashboard) => StatusResponse {
            state: "ready",
            stories: dashboard.read().await.stories().len(),
            error: None,
        },
        LoadState::Failed(error) => StatusResponse {
            state: "failed",
            stories: 0,
            error: Some(error.clone()),
        },
    };
    Json(response)
}

/// One story's metrics
#[derive(Debug, Serialize)]
pub struct StorySummary {
    pub title: String,
    pub complexity: f64,
    /// `null` when the story has no verbs
    pub wordiness: Option<f64>,
    pub rank: ComplexityRank,
    pub words: usize,
    pub descriptors: usize,
    pub verbs: usize,
    pub token_count: usize,
}

impl StorySummary {
    fn new(story: &StoryRecord, ranks: &ComplexityScale) -> Self {
        Self {
            title: story.title.clone(),
            complexity: story.complexity,
            wordiness: wordiness(story).value(),
            rank: ranks.rank(story.complexity),
            words: story.words.len(),
            descriptors: story.descriptors.len(),
            verbs: story.verbs.len(),
            token_count: story.token_count,
        }
    }
}

/// GET /api/stories
///
/// Per-story metrics in corpus order
pub async fn list_stories(
    State(state): State<AppState>,
) -> Result<Json<Vec<StorySummary>>, ApiError> {
    let dashboard = state.dashboard()?.read().await;
    let ranks = ComplexityScale::from_scores(dashboard.scores());
    let stories = dashboard
        .stories()
        .iter()
        .map(|story| StorySummary::new(story, &ranks))
        .collect();
    Ok(Json(stories))
}
