//! Outward-facing API errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rotomdex_storage::StorageError;
use serde_json::json;

/// Errors a handler can surface to the client.
///
/// The detail flow treats an unreachable or unusable upstream as "that
/// Pokémon does not exist" so callers see a `404` with the underlying
/// cause in `details`. Everything else is a `500`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested Pokémon could not be produced from cache or upstream.
    #[error("Pokémon not found: {details}")]
    PokemonNotFound { details: String },

    /// No game in the catalog matches the requested id.
    #[error("Game not found")]
    GameNotFound,

    /// A storage failure or a fault while assembling the index.
    #[error("internal error: {details}")]
    Internal { details: String },
}

impl ApiError {
    pub fn pokemon_not_found(details: impl Into<String>) -> Self {
        Self::PokemonNotFound {
            details: details.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal {
            details: details.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::NotFound { kind, .. } if kind == "Game" => Self::GameNotFound,
            _ => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::PokemonNotFound { details } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Pokémon not found", "details": details })),
            )
                .into_response(),
            Self::GameNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Game not found" })),
            )
                .into_response(),
            Self::Internal { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error", "details": details })),
            )
                .into_response(),
        }
    }
}
