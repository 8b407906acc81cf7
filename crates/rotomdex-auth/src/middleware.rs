//! Axum middleware guarding mutating routes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::claims::Claims;
use crate::error::AuthError;
use crate::token::TokenService;

/// Shared state handed to the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    #[must_use]
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self {
            tokens: Arc::new(TokenService::new(secret)),
        }
    }
}

/// Resolves the caller's identity from the request headers.
///
/// The entire `authorization` header value is treated as the token.
/// Clients send the bare JWT; there is no `Bearer` scheme prefix to
/// strip, and a prefixed value will simply fail verification.
pub fn authenticate(state: &AuthState, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let token = value
        .to_str()
        .map_err(|_| AuthError::invalid_token("authorization header is not valid UTF-8"))?;
    state.tokens.verify(token)
}

/// Rejects unauthenticated requests with an opaque `401`.
///
/// On success the decoded [`Claims`] are inserted into the request
/// extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, path = %req.uri().path(), "request authentication failed");
            err.into_response()
        }
    }
}
