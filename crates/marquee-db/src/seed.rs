//! Demo data loader.
//!
//! Replaces the catalogue with a fixed list of titles and logs what ended up
//! stored. Nothing calls this implicitly; the server binary runs it only
//! when seeding is enabled in configuration.

use marquee_types::Movie;

use crate::error::DbError;
use crate::store::MovieStore;

/// Seed `store` with one movie per title.
///
/// When `reset` is set, every existing movie is deleted first. Returns the
/// full catalogue as read back after seeding.
///
/// # Errors
///
/// Returns [`DbError`] if any store operation fails; movies saved before
/// the failure stay saved.
pub async fn seed_movies<S: MovieStore>(
    store: &S,
    titles: &[String],
    reset: bool,
) -> Result<Vec<Movie>, DbError> {
    if reset {
        let removed = store.delete_all().await?;
        tracing::info!(removed, "Cleared movie catalogue");
    }

    for title in titles {
        store.save(Movie::new(title.as_str())).await?;
    }

    let movies = store.find_all().await?;
    for movie in &movies {
        tracing::info!(
            id = movie.id.as_ref().map_or("-", |id| id.as_str()),
            title = %movie.title,
            "Seeded movie"
        );
    }
    tracing::info!(count = movies.len(), "Movie catalogue seeded");

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryMovieStore;

    fn titles() -> Vec<String> {
        ["Terminator 2", "Javatar", "Alien", "Predator"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn seeds_every_title() {
        let store = InMemoryMovieStore::new();
        let movies = seed_movies(&store, &titles(), true).await.unwrap_or_default();

        assert_eq!(movies.len(), 4);
        assert!(movies.iter().all(|m| m.id.is_some()));
        assert_eq!(movies.first().map(|m| m.title.as_str()), Some("Terminator 2"));
    }

    #[tokio::test]
    async fn reset_replaces_existing_catalogue() {
        let store = InMemoryMovieStore::new();
        let _ = store.save(Movie::new("Leftover")).await;

        let movies = seed_movies(&store, &titles(), true).await.unwrap_or_default();
        assert!(movies.iter().all(|m| m.title != "Leftover"));
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn without_reset_existing_movies_are_kept() {
        let store = InMemoryMovieStore::new();
        let _ = store.save(Movie::new("Leftover")).await;

        let movies = seed_movies(&store, &titles(), false).await.unwrap_or_default();
        assert_eq!(movies.len(), 5);
    }

    #[tokio::test]
    async fn seeding_twice_with_reset_is_stable() {
        let store = InMemoryMovieStore::new();
        let _ = seed_movies(&store, &titles(), true).await;
        let movies = seed_movies(&store, &titles(), true).await.unwrap_or_default();
        assert_eq!(movies.len(), 4);
    }
}
