//! Error types for the Marquee server binary.
//!
//! [`AppError`] is the top-level error type that wraps every failure mode
//! during startup and serving.

/// Top-level error for the Marquee server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Connecting to or seeding the movie store failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: marquee_db::DbError,
    },

    /// The event source rejected its settings.
    #[error("events error: {source}")]
    Events {
        /// The underlying events error.
        #[from]
        source: marquee_events::EventsError,
    },

    /// The API server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: marquee_api::ServerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_subsystem_errors() {
        let err = AppError::from(marquee_events::EventsError::ZeroInterval);
        assert!(matches!(err, AppError::Events { .. }));
        assert!(err.to_string().starts_with("events error:"));

        let err = AppError::from(marquee_api::ServerError::Bind(String::from("in use")));
        assert_eq!(err.to_string(), "server error: bind error: in use");
    }
}
