//! Planet handlers.

use crate::error::AppError;
use crate::extractors::{ApiJson, IdPath};
use crate::migration::PLANET;
use crate::models::NewPlanet;
use crate::response::{created, ok};
use crate::service::{optional_text, required_text};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub terrain: Option<String>,
}

impl CreatePlanetRequest {
    pub fn into_new(self) -> Result<NewPlanet, AppError> {
        Ok(NewPlanet {
            name: required_text(&PLANET, "name", self.name)?,
            population: optional_text(&PLANET, "population", self.population)?,
            climate: optional_text(&PLANET, "climate", self.climate)?,
            terrain: optional_text(&PLANET, "terrain", self.terrain)?,
        })
    }
}

/// GET /planets
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_planets().await?))
}

/// POST /planets
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreatePlanetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let planet = state.store.create_planet(body.into_new()?).await?;
    Ok(created(planet))
}

/// GET /planets/:id
pub async fn read(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let planet = state
        .store
        .get_planet(id)
        .await?
        .ok_or_else(|| AppError::not_found("Planet"))?;
    Ok(ok(planet))
}
