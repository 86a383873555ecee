//! Type-safe identifier wrappers.
//!
//! Movie identifiers are opaque strings. Stores assign UUID v7 strings
//! (time-ordered, so ids sort in insertion order), but any string is a
//! valid identifier for lookups and event subscriptions: callers never
//! have to prove an id exists before asking for it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifier of a movie, assigned by the movie store on first save.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MovieId(pub String);

impl MovieId {
    /// Generate a fresh store-side identifier (UUID v7, time-ordered).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner [`String`] value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for MovieId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_ordered() {
        let first = MovieId::generate();
        let second = MovieId::generate();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn generated_id_is_a_uuid() {
        let id = MovieId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = MovieId::from("m-42");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"m-42\""));
    }

    #[test]
    fn display_matches_inner() {
        let id = MovieId::from("alien");
        assert_eq!(id.to_string(), "alien");
    }
}
