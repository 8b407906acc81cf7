//! Authentication error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Why a request failed authentication.
///
/// Variants are kept distinct so operators can see the cause in logs,
/// but callers must never learn it: every variant renders as the same
/// generic `401` body.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request carried no `authorization` header.
    #[error("missing authorization token")]
    MissingToken,

    /// A token was presented but failed verification.
    #[error("invalid authorization token: {reason}")]
    InvalidToken { reason: String },

    /// Producing a signed token failed. Never triggered by inbound
    /// requests; surfaces from the signing path only.
    #[error("token signing failed: {reason}")]
    Signing { reason: String },
}

impl AuthError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    pub fn signing(reason: impl Into<String>) -> Self {
        Self::Signing {
            reason: reason.into(),
        }
    }

    /// Returns true for failures caused by the caller's credentials.
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::MissingToken | Self::InvalidToken { .. })
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        let reason = match err.kind() {
            ErrorKind::ExpiredSignature => "token expired".to_string(),
            ErrorKind::InvalidSignature => "signature verification failed".to_string(),
            ErrorKind::ImmatureSignature => "token not yet valid".to_string(),
            ErrorKind::InvalidAlgorithm => "unexpected signing algorithm".to_string(),
            _ => err.to_string(),
        };
        Self::InvalidToken { reason }
    }
}

/// All authentication failures collapse to one opaque response so the
/// body reveals nothing about whether a token was absent, expired, or
/// forged.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_token_renders_generic_401() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_string(response).await;
        assert_eq!(body, r#"{"message":"Unauthorized"}"#);
    }

    #[tokio::test]
    async fn invalid_token_reason_never_leaks() {
        let response = AuthError::invalid_token("signature verification failed").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_string(response).await;
        assert_eq!(body, r#"{"message":"Unauthorized"}"#);
        assert!(!body.contains("signature"));
    }

    #[test]
    fn credential_failure_predicate() {
        assert!(AuthError::MissingToken.is_credential_failure());
        assert!(AuthError::invalid_token("garbled").is_credential_failure());
        assert!(!AuthError::signing("serialization failed").is_credential_failure());
    }
}
