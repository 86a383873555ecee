//! In-process movie store.
//!
//! Records live in a `BTreeMap` keyed by [`MovieId`] behind a tokio
//! [`RwLock`]. Generated ids are UUID v7 strings, so iteration order matches
//! insertion order for store-assigned ids.

use std::collections::BTreeMap;
use std::sync::Arc;

use marquee_types::{Movie, MovieId};
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::MovieStore;

/// A [`MovieStore`] held entirely in memory.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieStore {
    movies: Arc<RwLock<BTreeMap<MovieId, Movie>>>,
}

impl InMemoryMovieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies.
    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    /// Whether the store holds no movies.
    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

impl MovieStore for InMemoryMovieStore {
    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        Ok(self.movies.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn save(&self, movie: Movie) -> Result<Movie, DbError> {
        let id = movie.id.clone().unwrap_or_else(MovieId::generate);
        tracing::debug!(%id, "Saving movie");
        let saved = movie.with_id(id.clone());
        self.movies.write().await.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let mut movies = self.movies.write().await;
        let removed = u64::try_from(movies.len()).unwrap_or(u64::MAX);
        movies.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_assigns_an_id() {
        let store = InMemoryMovieStore::new();
        let saved = store.save(Movie::new("Terminator 2")).await.ok();
        let id = saved.and_then(|m| m.id);
        assert!(id.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_with_id_replaces() {
        let store = InMemoryMovieStore::new();
        let id = MovieId::from("m-1");
        let _ = store.save(Movie::new("Alien").with_id(id.clone())).await;
        let _ = store.save(Movie::new("Aliens").with_id(id.clone())).await;

        assert_eq!(store.len().await, 1);
        let found = store.find_by_id(&id).await.ok().flatten();
        assert_eq!(found.map(|m| m.title), Some(String::from("Aliens")));
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = InMemoryMovieStore::new();
        let found = store.find_by_id(&MovieId::from("nope")).await;
        assert!(matches!(found, Ok(None)));
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = InMemoryMovieStore::new();
        for title in ["Terminator 2", "Javatar", "Alien", "Predator"] {
            let _ = store.save(Movie::new(title)).await;
        }

        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Terminator 2", "Javatar", "Alien", "Predator"]);
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let store = InMemoryMovieStore::new();
        let _ = store.save(Movie::new("Alien")).await;
        let _ = store.save(Movie::new("Predator")).await;

        let removed = store.delete_all().await.ok();
        assert_eq!(removed, Some(2));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryMovieStore::new();
        let other = store.clone();
        let _ = store.save(Movie::new("Alien")).await;
        assert_eq!(other.len().await, 1);
    }
}
