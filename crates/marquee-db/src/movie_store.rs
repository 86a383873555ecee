//! `PostgreSQL`-backed movie queries.
//!
//! Operates on the `movies` table created by the embedded migrations.
//! Rows are returned oldest first (`created_at`, then `id`).

use marquee_types::{Movie, MovieId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::store::MovieStore;

/// A [`MovieStore`] backed by the `movies` table.
#[derive(Debug, Clone)]
pub struct PostgresMovieStore {
    pool: PgPool,
}

impl PostgresMovieStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MovieStore for PostgresMovieStore {
    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r"SELECT id, title FROM movies ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        let row = sqlx::query_as::<_, MovieRow>(r"SELECT id, title FROM movies WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Movie::from))
    }

    async fn save(&self, movie: Movie) -> Result<Movie, DbError> {
        let id = movie.id.clone().unwrap_or_else(MovieId::generate);

        sqlx::query(
            r"INSERT INTO movies (id, title) VALUES ($1, $2)
              ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title",
        )
        .bind(id.as_str())
        .bind(&movie.title)
        .execute(&self.pool)
        .await?;

        tracing::debug!(%id, "Saved movie");
        Ok(movie.with_id(id))
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query(r"DELETE FROM movies").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MovieRow {
    /// Primary key.
    pub id: String,
    /// Display title.
    pub title: String,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: Some(MovieId(row.id)),
            title: row.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_persisted_movie() {
        let row = MovieRow {
            id: String::from("m-1"),
            title: String::from("Alien"),
        };
        let movie = Movie::from(row);
        assert_eq!(movie.id, Some(MovieId::from("m-1")));
        assert_eq!(movie.title, "Alien");
    }
}
