//! Server-sent event delivery for per-movie event streams.
//!
//! Clients connect to `GET /movies/{id}/events` and receive one
//! `data: <json>` frame per emitted [`MovieEvent`]. Each request gets its
//! own [`MovieEventStream`](marquee_events::MovieEventStream); nothing is
//! shared between connections.
//!
//! The stream ends when:
//!
//! - the client disconnects: hyper drops the response body, which drops
//!   the event stream and its timer. This is a normal end of a
//!   subscription, logged at `debug`.
//! - the server shuts down: the shared cancellation token fires and the
//!   body completes, letting graceful shutdown finish.
//!
//! The movie id is not checked against the store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::response::sse::{Event, Sse};
use futures::{Stream, StreamExt};
use marquee_types::{MovieEvent, MovieId};

use crate::state::AppState;

/// Stream server-sent events for one movie.
///
/// # Route
///
/// `GET /movies/{id}/events`
pub async fn movie_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let movie_id = MovieId::from(id);
    let mut subscription = Subscription::open(state.stream_gauge(), movie_id.clone());

    let frames = state
        .events
        .subscribe(movie_id)
        .take_until(state.shutdown.clone().cancelled_owned())
        .map(move |event| subscription.deliver(&event));

    Sse::new(frames)
}

/// Encode one event as one SSE frame.
pub fn to_frame(event: &MovieEvent) -> Result<Event, axum::Error> {
    Event::default().json_data(event)
}

/// Bookkeeping for one attached client.
///
/// Owned by the response body; dropped together with the event stream.
struct Subscription {
    movie_id: MovieId,
    /// Frames handed to the response body.
    delivered: u64,
    gauge: Arc<AtomicUsize>,
}

impl Subscription {
    fn open(gauge: Arc<AtomicUsize>, movie_id: MovieId) -> Self {
        let active = gauge.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        tracing::debug!(%movie_id, active, "Event stream subscribed");
        Self {
            movie_id,
            delivered: 0,
            gauge,
        }
    }

    /// Encode `event`; only frames that encode count as delivered.
    fn deliver(&mut self, event: &MovieEvent) -> Result<Event, axum::Error> {
        match to_frame(event) {
            Ok(frame) => {
                self.delivered = self.delivered.saturating_add(1);
                Ok(frame)
            }
            Err(e) => {
                tracing::warn!(movie_id = %self.movie_id, error = %e, "Failed to encode event");
                Err(e)
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let active = self.gauge.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
        tracing::debug!(
            movie_id = %self.movie_id,
            delivered = self.delivered,
            active,
            "Event stream closed"
        );
    }
}
