//! HTTP handlers for the Pokedex API.

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

use rotomdex_auth::Claims;
use rotomdex_core::{GameRecord, PokemonRecord, PokemonSummary};
use rotomdex_storage::{PokedexStorage, StoredGame};

use crate::error::ApiError;
use crate::server::AppState;

/// Body of `POST /pokemon/add`: a full record, optionally linked to the
/// submitting user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPokemonRequest {
    #[serde(flatten)]
    pub record: PokemonRecord,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Body of `POST /user/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_email: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Pokedex" }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "rotomdex-server",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.storage.backend_name(),
    }))
}

// ==================== Pokémon ====================

pub async fn pokemon_index(
    State(state): State<AppState>,
) -> Result<Json<Vec<PokemonSummary>>, ApiError> {
    let index = state.pokedex.pokemon_index().await?;
    Ok(Json(index))
}

pub async fn pokemon_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<PokemonRecord>, ApiError> {
    let record = state.pokedex.pokemon_detail(id).await?;
    Ok(Json(record))
}

pub async fn pokemon_add(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<AddPokemonRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let stored = state
        .storage
        .add_pokemon_for_user(body.record, body.user_id)
        .await?;
    tracing::info!(id = stored.id, subject = %claims.sub, "custom pokemon added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Pokemon added successfully",
            "pokemon": stored,
        })),
    ))
}

pub async fn pokemon_update(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(record): Json<PokemonRecord>,
) -> Result<StatusCode, ApiError> {
    state.storage.update_pokemon_by_id(id, record).await?;
    Ok(StatusCode::OK)
}

pub async fn pokemon_delete(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_pokemon_by_id(id).await?;
    Ok(StatusCode::OK)
}

// ==================== Users ====================

pub async fn user_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, ApiError> {
    let user = state
        .storage
        .upsert_login_by_email(&body.user_email, OffsetDateTime::now_utc())
        .await?;
    tracing::debug!(user = %user.id, "login recorded");
    Ok(StatusCode::OK)
}

// ==================== Games ====================

pub async fn games_index(State(state): State<AppState>) -> Result<Json<Vec<StoredGame>>, ApiError> {
    let games = state.storage.list_games().await?;
    Ok(Json(games))
}

pub async fn game_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredGame>, ApiError> {
    let game = state.storage.get_game(id).await?;
    game.map(Json).ok_or(ApiError::GameNotFound)
}

pub async fn game_add(
    State(state): State<AppState>,
    Json(game): Json<GameRecord>,
) -> Result<Json<StoredGame>, ApiError> {
    let stored = state.storage.create_game(game).await?;
    tracing::info!(id = %stored.id, generation = stored.game.generation, "game added to the catalog");
    Ok(Json(stored))
}

pub async fn game_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(game): Json<GameRecord>,
) -> Result<Json<StoredGame>, ApiError> {
    let stored = state.storage.update_game(id, game).await?;
    Ok(Json(stored))
}

pub async fn game_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_game(id).await?;
    Ok(StatusCode::OK)
}
