//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use marquee_db::DbError;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "marquee";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The movie store failed.
    #[error("store error: {0}")]
    Store(#[from] DbError),

    /// Missing or invalid credentials.
    #[error("authentication required")]
    Unauthorized,
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "Movie store failure");
                String::from("movie store unavailable")
            }
            Self::Unauthorized => self.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        let mut response = (status, axum::Json(body)).into_response();
        if matches!(self, Self::Unauthorized) {
            let challenge = format!("Basic realm=\"{AUTH_REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_server_errors() {
        let err = ApiError::from(DbError::Config(String::from("down")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok());
        assert_eq!(challenge, Some("Basic realm=\"marquee\""));
    }

    #[tokio::test]
    async fn store_error_body_hides_details() {
        let err = ApiError::from(DbError::Config(String::from("secret dsn")));
        assert!(err.to_string().contains("secret dsn"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await;
        assert!(bytes.is_ok());
        let body = bytes.unwrap_or_default();
        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("secret dsn"));

        let json: Result<serde_json::Value, _> = serde_json::from_slice(&body);
        assert_eq!(
            json.ok(),
            Some(serde_json::json!({"error": "movie store unavailable", "status": 500}))
        );
    }
}
