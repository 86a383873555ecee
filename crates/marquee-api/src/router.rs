//! Axum router construction for the API.
//!
//! Registers every entry of [`ROUTES`] in order, then wraps the result in
//! the Basic auth layer, CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::routes::ROUTES;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Layer order, outermost first: tracing, CORS (so preflight requests are
/// answered without credentials), Basic auth, handlers.
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = ROUTES.iter().fold(Router::new(), |router, route| {
        router.route(route.path, route.method_router())
    });

    router
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_basic_auth,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
