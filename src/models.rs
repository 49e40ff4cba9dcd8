//! Row types and their JSON projection, plus the insert payloads the repositories accept.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub population: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub planet_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default)]
pub struct NewCharacter {
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewPlanet {
    pub name: String,
    pub population: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// What a favorite points at. The table allows both columns to be null or set;
/// rows created through the API always have exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteTarget {
    Character(i32),
    Planet(i32),
}

impl FavoriteTarget {
    pub fn character_id(self) -> Option<i32> {
        match self {
            FavoriteTarget::Character(id) => Some(id),
            FavoriteTarget::Planet(_) => None,
        }
    }

    pub fn planet_id(self) -> Option<i32> {
        match self {
            FavoriteTarget::Planet(id) => Some(id),
            FavoriteTarget::Character(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NewFavorite {
    pub user_id: i32,
    pub target: FavoriteTarget,
}
