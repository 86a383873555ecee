//! Shared application state for the API server.
//!
//! [`AppState`] bundles the collaborators every handler needs: the movie
//! store, the event source that opens per-client event streams, the
//! credential list, and the shutdown token that ends open streams.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marquee_db::MovieRepository;
use marquee_events::EventSource;
use tokio_util::sync::CancellationToken;

use crate::auth::Security;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug)]
pub struct AppState {
    /// The movie catalogue.
    pub movies: MovieRepository,
    /// Factory for per-subscriber event streams.
    pub events: EventSource,
    /// Credentials enforced by the Basic auth layer.
    pub security: Security,
    /// Cancelled when the server begins shutting down.
    pub shutdown: CancellationToken,
    /// Number of event streams currently attached to a client.
    active_streams: Arc<AtomicUsize>,
}

impl AppState {
    /// Create state with security disabled and a fresh shutdown token.
    pub fn new(movies: MovieRepository, events: EventSource) -> Self {
        Self {
            movies,
            events,
            security: Security::disabled(),
            shutdown: CancellationToken::new(),
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the credential list.
    #[must_use]
    pub fn with_security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Use an externally owned shutdown token.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Number of event streams currently attached to a client.
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::Acquire)
    }

    /// Shared handle to the live-stream gauge.
    pub(crate) fn stream_gauge(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.active_streams)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MovieRepository::in_memory(), EventSource::default())
    }
}
