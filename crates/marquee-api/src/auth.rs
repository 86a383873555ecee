//! HTTP Basic authentication against a configured credential list.
//!
//! The credential list comes from configuration. When it is empty the
//! layer lets every request through; otherwise each request must carry a
//! valid `Authorization: Basic ...` header. Roles are attached to the
//! request as an [`AuthenticatedUser`] extension, but no route is
//! restricted to a role.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// One configured user.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UserCredential {
    /// Login name.
    pub username: String,
    /// Plain-text password (demo credentials only).
    pub password: String,
    /// Role names granted to the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserCredential {
    /// Build a credential entry.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Login name.
    pub username: String,
    /// Granted roles.
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Whether the user holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// The credential list checked by [`require_basic_auth`].
#[derive(Debug, Clone, Default)]
pub struct Security {
    users: Vec<UserCredential>,
}

impl Security {
    /// Enforce Basic authentication against `users`. An empty list
    /// disables enforcement.
    pub const fn new(users: Vec<UserCredential>) -> Self {
        Self { users }
    }

    /// No authentication.
    pub const fn disabled() -> Self {
        Self { users: Vec::new() }
    }

    /// Whether requests must authenticate.
    pub fn is_enabled(&self) -> bool {
        !self.users.is_empty()
    }

    /// Number of configured users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Check a username/password pair. Usernames match case-insensitively;
    /// passwords match exactly.
    pub fn verify(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        self.users
            .iter()
            .find(|u| {
                u.username.eq_ignore_ascii_case(username)
                    && constant_time_eq(u.password.as_bytes(), password.as_bytes())
            })
            .map(|u| AuthenticatedUser {
                username: u.username.clone(),
                roles: u.roles.clone(),
            })
    }

    /// Authenticate from request headers.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<AuthenticatedUser> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (username, password) = parse_basic(value)?;
        self.verify(&username, &password)
    }
}

/// Middleware enforcing [`Security`] from the shared [`AppState`].
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.security.is_enabled() {
        return next.run(request).await;
    }

    match state.security.authenticate(request.headers()) {
        Some(user) => {
            tracing::trace!(username = %user.username, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Decode a `Basic <base64(user:pass)>` header value.
fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn demo() -> Security {
        Security::new(vec![
            UserCredential::new("vlad", "pass", ["ADMIN", "USER"]),
            UserCredential::new("ivan", "pass", ["USER"]),
        ])
    }

    fn basic(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = STANDARD.encode(format!("{user}:{pass}"));
        if let Ok(value) = HeaderValue::from_str(&format!("Basic {token}")) {
            headers.insert(header::AUTHORIZATION, value);
        }
        headers
    }

    #[test]
    fn empty_list_disables_security() {
        assert!(!Security::disabled().is_enabled());
        assert!(!Security::new(Vec::new()).is_enabled());
        assert!(demo().is_enabled());
        assert_eq!(demo().user_count(), 2);
    }

    #[test]
    fn valid_credentials_carry_roles() {
        let user = demo().authenticate(&basic("vlad", "pass"));
        assert!(user.as_ref().is_some_and(|u| u.has_role("ADMIN")));
        assert!(user.is_some_and(|u| u.has_role("USER")));

        let user = demo().authenticate(&basic("ivan", "pass"));
        assert!(user.is_some_and(|u| !u.has_role("ADMIN")));
    }

    #[test]
    fn username_ignores_case() {
        let security = Security::new(vec![UserCredential::new("Vlad", "pass", ["ADMIN"])]);
        for name in ["Vlad", "vlad", "VLAD"] {
            let user = security.authenticate(&basic(name, "pass"));
            assert!(user.is_some_and(|u| u.username == "Vlad"), "{name}");
        }
        assert!(security.authenticate(&basic("vlad", "PASS")).is_none());
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(demo().authenticate(&basic("vlad", "nope")).is_none());
        assert!(demo().authenticate(&basic("nobody", "pass")).is_none());
    }

    #[test]
    fn missing_or_malformed_header_is_rejected() {
        assert!(demo().authenticate(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(demo().authenticate(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic !!!"));
        assert!(demo().authenticate(&headers).is_none());
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let token = STANDARD.encode("ivan:pass");
        assert_eq!(
            parse_basic(&format!("basic {token}")),
            Some((String::from("ivan"), String::from("pass")))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        let token = STANDARD.encode("ivan:a:b");
        assert_eq!(
            parse_basic(&format!("Basic {token}")),
            Some((String::from("ivan"), String::from("a:b")))
        );
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", UserCredential::new("vlad", "hunter2", ["USER"]));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn credentials_deserialize_without_roles() {
        let parsed: Result<UserCredential, _> =
            serde_json::from_str(r#"{"username": "ivan", "password": "pass"}"#);
        assert!(parsed.is_ok_and(|u| u.roles.is_empty()));
    }
}
