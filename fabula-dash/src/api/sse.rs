//! Server-Sent Events endpoint

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events
///
/// Streams `SelectionChanged` and `LinesToggled`, plus keep-alive comments.
/// Hover is never streamed.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.sse.handle_sse_connection()
}
