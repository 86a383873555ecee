//! REST endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML index of the route table |
//! | `GET` | `/movies` | All movies |
//! | `GET` | `/movies/{id}` | One movie, or an empty `200` when unknown |
//!
//! The event stream endpoint lives in [`crate::sse`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use marquee_db::MovieStore;
use marquee_types::{Movie, MovieId};

use crate::error::ApiError;
use crate::routes::ROUTES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- route index
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page listing every route.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rows: String = ROUTES
        .iter()
        .map(|route| {
            format!(
                "        <li><code>{} {}</code> -- {}</li>\n",
                route.verb(),
                route.path,
                route.summary
            )
        })
        .collect();

    let backend = state.movies.backend();
    let interval_ms = state.events.interval().as_millis();
    let streams = state.active_streams();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Marquee</title>
</head>
<body>
    <h1>Marquee</h1>
    <p>Store: <b>{backend}</b> | Event interval: <b>{interval_ms} ms</b> | Live streams: <b>{streams}</b></p>
    <ul>
{rows}    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /movies -- list movies
// ---------------------------------------------------------------------------

/// Return every movie in the store as a JSON array.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.movies.find_all().await?;
    tracing::debug!(count = movies.len(), "Listed movies");
    Ok(Json(movies))
}

// ---------------------------------------------------------------------------
// GET /movies/{id} -- single movie
// ---------------------------------------------------------------------------

/// Return one movie as JSON.
///
/// An unknown id is answered with `200 OK` and an empty body rather than an
/// error document.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = MovieId::from(id);
    match state.movies.find_by_id(&id).await? {
        Some(movie) => Ok(Json(movie).into_response()),
        None => {
            tracing::debug!(%id, "Movie not found, returning empty body");
            Ok(().into_response())
        }
    }
}
