//! Widget rendering endpoint

use crate::widgets::HoverTarget;
use crate::{ApiError, AppState};
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

/// Query parameters for GET /api/widgets/:name
#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    /// Transient hover target (`story:<title>`, `complexity`, `wordiness`,
    /// `info:wordiness`, `info:complexity`)
    pub hover: Option<String>,
}

/// GET /api/widgets/:name
///
/// Renders `diagram`, `spectrum`, `list` or `legend`. Rendering takes the
/// read lock only; a hover never changes dashboard state.
pub async fn get_widget(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<WidgetQuery>,
) -> Result<Html<String>, ApiError> {
    let hover = query
        .hover
        .as_deref()
        .filter(|h| !h.is_empty())
        .map(str::parse::<HoverTarget>)
        .transpose()?;

    let dashboard = state.dashboard()?.read().await;
    let markup = dashboard.render(&name, hover.as_ref())?;
    Ok(Html(markup))
}
