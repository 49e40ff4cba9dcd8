//! Character handlers.

use crate::error::AppError;
use crate::extractors::{ApiJson, IdPath};
use crate::migration::CHARACTER;
use crate::models::NewCharacter;
use crate::response::{created, ok};
use crate::service::{optional_text, required_text};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreateCharacterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
}

impl CreateCharacterRequest {
    pub fn into_new(self) -> Result<NewCharacter, AppError> {
        Ok(NewCharacter {
            name: required_text(&CHARACTER, "name", self.name)?,
            gender: optional_text(&CHARACTER, "gender", self.gender)?,
            birth_year: optional_text(&CHARACTER, "birth_year", self.birth_year)?,
            eye_color: optional_text(&CHARACTER, "eye_color", self.eye_color)?,
        })
    }
}

/// GET /characters
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_characters().await?))
}

/// POST /characters
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCharacterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let character = state.store.create_character(body.into_new()?).await?;
    Ok(created(character))
}

/// GET /characters/:id
pub async fn read(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let character = state
        .store
        .get_character(id)
        .await?
        .ok_or_else(|| AppError::not_found("Character"))?;
    Ok(ok(character))
}
