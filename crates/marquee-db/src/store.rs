//! The [`MovieStore`] abstraction and its runtime-selected implementation.

use marquee_types::{Movie, MovieId};

use crate::error::DbError;
use crate::memory::InMemoryMovieStore;
use crate::movie_store::PostgresMovieStore;

/// Persistence operations for movie records.
///
/// Implementations must be safe to share between request handlers; all
/// returned futures are `Send` so they can run on any runtime worker.
pub trait MovieStore: Send + Sync {
    /// Return every stored movie.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend cannot be read.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Movie>, DbError>> + Send;

    /// Look up a single movie. Unknown ids yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend cannot be read.
    fn find_by_id(
        &self,
        id: &MovieId,
    ) -> impl Future<Output = Result<Option<Movie>, DbError>> + Send;

    /// Insert or replace a movie and return the persisted record.
    ///
    /// A movie without an id is assigned a fresh [`MovieId`]; a movie with
    /// an id replaces any record stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    fn save(&self, movie: Movie) -> impl Future<Output = Result<Movie, DbError>> + Send;

    /// Remove every movie, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    fn delete_all(&self) -> impl Future<Output = Result<u64, DbError>> + Send;
}

/// The movie store chosen at startup.
#[derive(Debug, Clone)]
pub enum MovieRepository {
    /// Process-local store; contents are lost on restart.
    InMemory(InMemoryMovieStore),
    /// `PostgreSQL`-backed store.
    Postgres(PostgresMovieStore),
}

impl MovieRepository {
    /// An empty in-memory repository.
    pub fn in_memory() -> Self {
        Self::InMemory(InMemoryMovieStore::new())
    }

    /// Short backend name for logs.
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl MovieStore for MovieRepository {
    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        match self {
            Self::InMemory(store) => store.find_all().await,
            Self::Postgres(store) => store.find_all().await,
        }
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        match self {
            Self::InMemory(store) => store.find_by_id(id).await,
            Self::Postgres(store) => store.find_by_id(id).await,
        }
    }

    async fn save(&self, movie: Movie) -> Result<Movie, DbError> {
        match self {
            Self::InMemory(store) => store.save(movie).await,
            Self::Postgres(store) => store.save(movie).await,
        }
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        match self {
            Self::InMemory(store) => store.delete_all().await,
            Self::Postgres(store) => store.delete_all().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_repository_delegates() {
        let repo = MovieRepository::in_memory();
        assert_eq!(repo.backend(), "memory");

        let saved = repo.save(Movie::new("Alien")).await;
        assert!(saved.is_ok());

        let all = repo.find_all().await.unwrap_or_default();
        assert_eq!(all.len(), 1);
    }
}
