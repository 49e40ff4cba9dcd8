//! User handlers: list, create, and a user's favorites.

use crate::error::AppError;
use crate::extractors::{ApiJson, IdPath};
use crate::migration::USER;
use crate::models::NewUser;
use crate::response::{created, ok};
use crate::service::{hash_password, required_text};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CreateUserRequest {
    /// Validates presence and length, hashes the password, and activates the account.
    pub async fn into_new(self) -> Result<NewUser, AppError> {
        let email = required_text(&USER, "email", self.email)?;
        let password = required_text(&USER, "password", self.password)?;
        Ok(NewUser {
            email,
            password_hash: hash_password(password).await?,
            is_active: true,
        })
    }
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.store.list_users().await?;
    Ok(ok(users))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = body.into_new().await?;
    let user = state.store.create_user(new).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok(created(user))
}

/// GET /users/:id/favorites. Unknown users have no favorites.
pub async fn favorites(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let favorites = state.store.list_favorites_by_user(user_id).await?;
    Ok(ok(favorites))
}
