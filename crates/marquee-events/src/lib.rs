//! Per-movie event stream generation.
//!
//! An [`EventSource`] hands out one [`MovieEventStream`] per subscriber.
//! Each stream is an infinite, lazily-evaluated sequence of
//! [`MovieEvent`](marquee_types::MovieEvent)s for a single movie id,
//! paced at a fixed interval.
//!
//! # Architecture
//!
//! Streams are pull-driven. Nothing runs in the background: the pacing
//! timer is a single [`tokio::time::Sleep`] owned by the stream, armed on
//! the first poll and re-armed after every emission. A slow consumer
//! therefore slows production down instead of filling a queue, and
//! dropping the stream (for example when the HTTP client disconnects)
//! deregisters the timer and ends all work for that subscription.
//!
//! ```text
//! EventSource --subscribe(id)--> MovieEventStream --poll--> Sleep(interval)
//!                                        |                      |
//!                                        +<----- Clock::now ----+
//! ```
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait and the wall-clock [`SystemClock`]
//! - [`stream`] -- [`EventSource`] and [`MovieEventStream`]
//! - [`error`] -- [`EventsError`]

pub mod clock;
pub mod error;
pub mod stream;

pub use clock::{Clock, SystemClock};
pub use error::EventsError;
pub use stream::{DEFAULT_INTERVAL, EventSource, MovieEventStream};
