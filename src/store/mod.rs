//! Repository interfaces, one per entity, and the storage backends implementing them.
//!
//! Handlers only see `dyn Store`; nothing above this module touches sqlx.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect, ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::models::{Character, Favorite, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new: NewUser) -> Result<User, AppError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError>;
    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    async fn create_character(&self, new: NewCharacter) -> Result<Character, AppError>;
    async fn get_character(&self, id: i32) -> Result<Option<Character>, AppError>;
    async fn list_characters(&self) -> Result<Vec<Character>, AppError>;
}

#[async_trait]
pub trait PlanetRepository: Send + Sync {
    async fn create_planet(&self, new: NewPlanet) -> Result<Planet, AppError>;
    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError>;
    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Fails with `Conflict` when the user or the target does not exist.
    async fn create_favorite(&self, new: NewFavorite) -> Result<Favorite, AppError>;
    async fn get_favorite(&self, id: i32) -> Result<Option<Favorite>, AppError>;
    async fn list_favorites(&self) -> Result<Vec<Favorite>, AppError>;
    /// Favorites of one user, ordered by id. Empty for unknown users.
    async fn list_favorites_by_user(&self, user_id: i32) -> Result<Vec<Favorite>, AppError>;
}

/// The storage handle injected into every handler.
#[async_trait]
pub trait Store: UserRepository + CharacterRepository + PlanetRepository + FavoriteRepository {
    /// Backend name for logs.
    fn backend(&self) -> &'static str;
    /// Readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}
