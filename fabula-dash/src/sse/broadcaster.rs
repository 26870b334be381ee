//! SSE broadcaster for committed-state notifications

use axum::response::sse::{Event, KeepAlive, Sse};
use fabula_common::events::DashboardEvent;
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default number of buffered events per client
pub const DEFAULT_CAPACITY: usize = 100;

/// Fans dashboard events out to every connected browser
#[derive(Clone)]
pub struct SseBroadcaster {
    tx: broadcast::Sender<DashboardEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before slow clients lag
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        info!("SSE broadcaster initialized with capacity {}", capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring if no clients are connected
    pub fn broadcast_lossy(&self, event: DashboardEvent) {
        match self.tx.send(event) {
            Ok(count) => debug!("Broadcast event to {} clients", count),
            Err(_) => debug!("No SSE clients connected; event dropped"),
        }
    }

    /// Get current number of connected clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe to raw events
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// SSE stream for a new client connection
    ///
    /// Starts with a `ConnectionStatus` event. A client that falls behind
    /// skips the missed events; it re-fetches the widgets on the next one
    /// it receives.
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let mut rx = self.tx.subscribe();
        let client_id = Uuid::new_v4();

        async_stream::stream! {
            debug!(%client_id, "SSE stream started");
            yield Ok(Event::default().event("ConnectionStatus").data("connected"));

            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Ok(sse) = Event::default().event(event.event_type()).json_data(&event) {
                            yield Ok(sse);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%client_id, "SSE client lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!(%client_id, "SSE stream ended");
        }
    }

    /// Axum SSE response for GET /api/events
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        let stream = self.subscribe_stream();
        info!("New SSE client connected, total clients: {}", self.client_count());

        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
    }
}

impl Default for SseBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let broadcaster = SseBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();
        assert_eq!(broadcaster.client_count(), 1);

        broadcaster.broadcast_lossy(DashboardEvent::selection_changed("MR. FOX"));
        match rx.recv().await.unwrap() {
            DashboardEvent::SelectionChanged { title, .. } => assert_eq!(title, "MR. FOX"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_broadcast_without_clients_is_harmless() {
        let broadcaster = SseBroadcaster::default();
        broadcaster.broadcast_lossy(DashboardEvent::lines_toggled(false));
        assert_eq!(broadcaster.client_count(), 0);
    }

    #[tokio::test]
    async fn test_stream_yields_events() {
        let broadcaster = SseBroadcaster::new(8);
        use futures::StreamExt;

        let stream = broadcaster.subscribe_stream();
        futures::pin_mut!(stream);

        // connection status, then the event
        assert!(stream.next().await.is_some());
        broadcaster.broadcast_lossy(DashboardEvent::lines_toggled(true));
        assert!(stream.next().await.is_some());
    }
}
