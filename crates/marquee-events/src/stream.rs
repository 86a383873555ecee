//! Paced, infinite event streams scoped to a single movie.
//!
//! [`EventSource::subscribe`] creates a fresh [`MovieEventStream`] every
//! time it is called. Two subscriptions for the same movie never share a
//! timer, a counter, or any other state.
//!
//! # Pacing
//!
//! The pacing timer is armed when the stream is first polled, which is the
//! moment the subscription starts. After each emission the timer is re-armed
//! one interval from the emission instant, so:
//!
//! - the Nth event is never produced before `N * interval` has elapsed;
//! - consecutive events are always at least one interval apart;
//! - a consumer that stops pulling for a while gets at most one event
//!   immediately on return, never a burst of missed ticks.
//!
//! # Timestamps
//!
//! Timestamps never decrease within one stream. If the clock steps
//! backwards (an NTP correction, say), the stream repeats the latest
//! timestamp it emitted until the clock catches up.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::Stream;
use marquee_types::{MovieEvent, MovieId};
use tokio::time::{Sleep, sleep};

use crate::clock::{Clock, SystemClock};
use crate::error::EventsError;

/// Interval between events when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// EventSource
// ---------------------------------------------------------------------------

/// Factory for per-subscriber event streams.
///
/// Cheap to clone; every clone shares the same clock and interval.
#[derive(Clone)]
pub struct EventSource {
    interval: Duration,
    clock: Arc<dyn Clock>,
}

impl EventSource {
    /// Create an event source reading the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::ZeroInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, EventsError> {
        Self::with_clock(interval, Arc::new(SystemClock))
    }

    /// Create an event source reading the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::ZeroInterval`] if `interval` is zero.
    pub fn with_clock(interval: Duration, clock: Arc<dyn Clock>) -> Result<Self, EventsError> {
        if interval.is_zero() {
            return Err(EventsError::ZeroInterval);
        }
        Ok(Self { interval, clock })
    }

    /// The pacing interval handed to every new stream.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Open a new, independent event stream for `movie_id`.
    ///
    /// The id is not checked against any store: events are produced for
    /// whatever id the caller supplies.
    pub fn subscribe(&self, movie_id: impl Into<MovieId>) -> MovieEventStream {
        MovieEventStream {
            movie_id: movie_id.into(),
            interval: self.interval,
            clock: Arc::clone(&self.clock),
            delay: None,
            last: None,
            emitted: 0,
        }
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            clock: Arc::new(SystemClock),
        }
    }
}

impl fmt::Debug for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// MovieEventStream
// ---------------------------------------------------------------------------

/// One subscriber's infinite sequence of [`MovieEvent`]s.
///
/// Never yields `None`. Dropping the stream cancels it: the pending timer
/// is deregistered and the clock is never read again.
pub struct MovieEventStream {
    movie_id: MovieId,
    interval: Duration,
    clock: Arc<dyn Clock>,
    /// Pacing timer; `None` until the first poll.
    delay: Option<Pin<Box<Sleep>>>,
    /// Timestamp of the latest event; the floor for the next one.
    last: Option<DateTime<Utc>>,
    emitted: u64,
}

impl MovieEventStream {
    /// The movie id every event of this stream carries.
    pub const fn movie_id(&self) -> &MovieId {
        &self.movie_id
    }

    /// Number of events produced so far.
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Stream for MovieEventStream {
    type Item = MovieEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let interval = this.interval;

        let delay = this.delay.get_or_insert_with(|| {
            tracing::trace!(movie_id = %this.movie_id, ?interval, "event stream armed");
            Box::pin(sleep(interval))
        });

        ready!(delay.as_mut().poll(cx));

        let now = this.clock.now();
        let date = this.last.map_or(now, |last| now.max(last));
        if date != now {
            tracing::debug!(
                movie_id = %this.movie_id,
                %now,
                %date,
                "clock stepped back, holding timestamp"
            );
        }
        this.last = Some(date);
        delay.set(sleep(interval));
        this.emitted = this.emitted.saturating_add(1);

        tracing::trace!(movie_id = %this.movie_id, seq = this.emitted, %date, "event produced");

        Poll::Ready(Some(MovieEvent {
            movie_id: this.movie_id.clone(),
            date,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl fmt::Debug for MovieEventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovieEventStream")
            .field("movie_id", &self.movie_id)
            .field("interval", &self.interval)
            .field("armed", &self.delay.is_some())
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}
