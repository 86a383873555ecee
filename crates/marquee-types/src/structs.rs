//! Core record types: the persisted [`Movie`] and the ephemeral
//! [`MovieEvent`] emitted on per-movie event streams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::MovieId;

// ---------------------------------------------------------------------------
// Movie
// ---------------------------------------------------------------------------

/// A movie record owned by the movie store.
///
/// `id` is `None` until the record has been persisted; the store assigns
/// it on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Movie {
    /// Store-assigned identifier.
    pub id: Option<MovieId>,
    /// Display title.
    pub title: String,
}

impl Movie {
    /// Create an unsaved movie with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    /// Return a copy of this movie carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: MovieId) -> Self {
        self.id = Some(id);
        self
    }
}

// ---------------------------------------------------------------------------
// MovieEvent
// ---------------------------------------------------------------------------

/// A timestamped notification scoped to one movie.
///
/// Created fresh on every tick of an event stream and never persisted.
/// Serialized in camelCase (`movieId`, `date`) with an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MovieEvent {
    /// The movie id the stream was opened for.
    pub movie_id: MovieId,
    /// Wall-clock time at which the event was produced.
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn unsaved_movie_has_no_id() {
        let movie = Movie::new("Alien");
        assert!(movie.id.is_none());
        assert_eq!(movie.title, "Alien");
    }

    #[test]
    fn movie_wire_format() {
        let movie = Movie::new("Predator").with_id(MovieId::from("p-1"));
        let json = serde_json::to_value(&movie).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"id": "p-1", "title": "Predator"}));
    }

    #[test]
    fn event_wire_format_is_camel_case() {
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).single();
        assert!(date.is_some());
        let event = MovieEvent {
            movie_id: MovieId::from("m-42"),
            date: date.unwrap_or_default(),
        };
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["movieId"], "m-42");
        assert_eq!(json["date"], "2026-10-17T12:00:00Z");
    }
}
