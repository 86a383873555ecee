//! Movie store for the Marquee movie service.
//!
//! The HTTP layer only ever talks to the [`MovieStore`] trait. Two backends
//! implement it, and [`MovieRepository`] picks one at runtime from
//! configuration:
//!
//! ```text
//! Handlers / seed runner
//!     |
//!     +-- MovieRepository
//!           |-- InMemoryMovieStore   (tests, demos)
//!           +-- PostgresMovieStore   (PostgresPool, sqlx)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`MovieStore`] trait and the [`MovieRepository`] dispatcher
//! - [`memory`] -- In-process store backed by a `BTreeMap`
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`movie_store`] -- `PostgreSQL`-backed movie queries
//! - [`seed`] -- Demo data loader
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod movie_store;
pub mod postgres;
pub mod seed;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::InMemoryMovieStore;
pub use movie_store::{MovieRow, PostgresMovieStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use seed::seed_movies;
pub use store::{MovieRepository, MovieStore};
