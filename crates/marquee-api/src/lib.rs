//! HTTP API for the Marquee movie service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for reading the movie catalogue (`/movies`,
//!   `/movies/{id}`)
//! - **Server-sent events** (`/movies/{id}/events`) streaming one
//!   timestamped event per interval for as long as the client stays
//!   connected
//! - **Minimal HTML index** (`GET /`) listing the route table
//!
//! # Architecture
//!
//! Routes are declared once in [`routes::ROUTES`] and the router is built
//! from that table. Every request passes through an HTTP Basic layer that
//! checks the configured demo credentials (disabled when none are
//! configured). Each SSE response owns exactly one
//! [`MovieEventStream`](marquee_events::MovieEventStream); when the client
//! disconnects, hyper drops the response body and with it the stream and
//! its timer. On shutdown a shared cancellation token ends every open
//! stream so graceful shutdown can complete.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod server;
pub mod sse;
pub mod state;

// Re-export primary types for convenience.
pub use auth::{AuthenticatedUser, Security, UserCredential};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use state::AppState;
