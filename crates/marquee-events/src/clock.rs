//! Wall-clock abstraction used to timestamp events.
//!
//! Event streams read the clock exactly once per emitted event and never
//! while suspended, so a [`Clock`] implementation can count reads to prove
//! that a dropped stream does no further work.

use chrono::{DateTime, Utc};

/// A source of wall-clock timestamps.
pub trait Clock: Send + Sync {
    /// Return the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
