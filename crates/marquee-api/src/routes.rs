//! The route table.
//!
//! Every endpoint is declared here exactly once, in order. The router is
//! built from this table and the index page renders it, so the two can
//! never drift apart. Paths must be unique.

use std::sync::Arc;

use axum::routing::{MethodFilter, MethodRouter, on};

use crate::handlers;
use crate::sse;
use crate::state::AppState;

/// The handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// HTML index listing this table.
    Index,
    /// Full catalogue snapshot.
    ListMovies,
    /// Single movie lookup.
    GetMovie,
    /// Server-sent event stream for one movie.
    MovieEvents,
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// HTTP method(s) accepted.
    pub method: MethodFilter,
    /// Axum path pattern.
    pub path: &'static str,
    /// Dispatch target.
    pub endpoint: Endpoint,
    /// One-line description for the index page.
    pub summary: &'static str,
}

/// All routes served by the API, in declaration order.
pub const ROUTES: &[Route] = &[
    Route {
        method: MethodFilter::GET,
        path: "/",
        endpoint: Endpoint::Index,
        summary: "This page",
    },
    Route {
        method: MethodFilter::GET,
        path: "/movies",
        endpoint: Endpoint::ListMovies,
        summary: "All movies (JSON array)",
    },
    Route {
        method: MethodFilter::GET,
        path: "/movies/{id}",
        endpoint: Endpoint::GetMovie,
        summary: "One movie (JSON), empty body if unknown",
    },
    Route {
        method: MethodFilter::GET,
        path: "/movies/{id}/events",
        endpoint: Endpoint::MovieEvents,
        summary: "Live event stream (text/event-stream), one event per interval",
    },
];

impl Route {
    /// Method name for display.
    pub fn verb(&self) -> &'static str {
        [
            (MethodFilter::GET, "GET"),
            (MethodFilter::POST, "POST"),
            (MethodFilter::PUT, "PUT"),
            (MethodFilter::DELETE, "DELETE"),
            (MethodFilter::PATCH, "PATCH"),
        ]
        .into_iter()
        .find_map(|(filter, name)| (filter == self.method).then_some(name))
        .unwrap_or("*")
    }

    /// The Axum method router for this entry.
    pub fn method_router(&self) -> MethodRouter<Arc<AppState>> {
        match self.endpoint {
            Endpoint::Index => on(self.method, handlers::index),
            Endpoint::ListMovies => on(self.method, handlers::list_movies),
            Endpoint::GetMovie => on(self.method, handlers::get_movie),
            Endpoint::MovieEvents => on(self.method, sse::movie_events),
        }
    }
}
