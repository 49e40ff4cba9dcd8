//! Favorite handlers. The path names the target; the body names the user.

use crate::error::AppError;
use crate::extractors::{ApiJson, IdPath};
use crate::models::{FavoriteTarget, NewFavorite};
use crate::response::created;
use crate::service::required_id;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub user_id: Option<i32>,
}

async fn add(
    state: &AppState,
    body: AddFavoriteRequest,
    target: FavoriteTarget,
) -> Result<impl IntoResponse, AppError> {
    let user_id = required_id("user_id", body.user_id)?;
    let favorite = state
        .store
        .create_favorite(NewFavorite { user_id, target })
        .await?;
    tracing::info!(favorite_id = favorite.id, user_id, target = ?target, "favorite added");
    Ok(created(favorite))
}

/// POST /favorite/planet/:planet_id
pub async fn add_planet(
    State(state): State<AppState>,
    IdPath(planet_id): IdPath,
    ApiJson(body): ApiJson<AddFavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    add(&state, body, FavoriteTarget::Planet(planet_id)).await
}

/// POST /favorite/character/:character_id
pub async fn add_character(
    State(state): State<AppState>,
    IdPath(character_id): IdPath,
    ApiJson(body): ApiJson<AddFavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    add(&state, body, FavoriteTarget::Character(character_id)).await
}
