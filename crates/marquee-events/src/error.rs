//! Error types for event stream construction.
//!
//! Streams themselves never fail once built; the only fallible step is
//! validating the pacing parameters.

/// Errors that can occur when configuring an [`EventSource`](crate::EventSource).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventsError {
    /// The pacing interval was zero.
    #[error("event interval must be greater than zero")]
    ZeroInterval,
}
