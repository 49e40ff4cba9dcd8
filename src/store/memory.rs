//! In-process store. Mirrors the table constraints the API can violate:
//! serial ids, unique user email, and the favorite foreign keys.

use crate::error::AppError;
use crate::models::{
    Character, Favorite, FavoriteTarget, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User,
};
use crate::store::{CharacterRepository, FavoriteRepository, PlanetRepository, Store, UserRepository};
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    characters: Vec<Character>,
    planets: Vec<Planet>,
    favorites: Vec<Favorite>,
}

/// Rows are never deleted, so the next id is always `len + 1`.
fn next_id<T>(rows: &[T]) -> i32 {
    rows.len() as i32 + 1
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        let mut t = self.write();
        if t.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict("email already registered".into()));
        }
        let user = User {
            id: next_id(&t.users),
            email: new.email,
            password: new.password_hash,
            is_active: Some(new.is_active),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read().users.clone())
    }
}

#[async_trait]
impl CharacterRepository for MemoryStore {
    async fn create_character(&self, new: NewCharacter) -> Result<Character, AppError> {
        let mut t = self.write();
        let character = Character {
            id: next_id(&t.characters),
            name: new.name,
            gender: new.gender,
            birth_year: new.birth_year,
            eye_color: new.eye_color,
        };
        t.characters.push(character.clone());
        Ok(character)
    }

    async fn get_character(&self, id: i32) -> Result<Option<Character>, AppError> {
        Ok(self.read().characters.iter().find(|c| c.id == id).cloned())
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        Ok(self.read().characters.clone())
    }
}

#[async_trait]
impl PlanetRepository for MemoryStore {
    async fn create_planet(&self, new: NewPlanet) -> Result<Planet, AppError> {
        let mut t = self.write();
        let planet = Planet {
            id: next_id(&t.planets),
            name: new.name,
            population: new.population,
            climate: new.climate,
            terrain: new.terrain,
        };
        t.planets.push(planet.clone());
        Ok(planet)
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        Ok(self.read().planets.iter().find(|p| p.id == id).cloned())
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.read().planets.clone())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn create_favorite(&self, new: NewFavorite) -> Result<Favorite, AppError> {
        let mut t = self.write();
        if !t.users.iter().any(|u| u.id == new.user_id) {
            return Err(AppError::Conflict("user does not exist".into()));
        }
        let target_exists = match new.target {
            FavoriteTarget::Character(id) => t.characters.iter().any(|c| c.id == id),
            FavoriteTarget::Planet(id) => t.planets.iter().any(|p| p.id == id),
        };
        if !target_exists {
            return Err(AppError::Conflict(match new.target {
                FavoriteTarget::Character(_) => "character does not exist".into(),
                FavoriteTarget::Planet(_) => "planet does not exist".into(),
            }));
        }
        let favorite = Favorite {
            id: next_id(&t.favorites),
            user_id: new.user_id,
            character_id: new.target.character_id(),
            planet_id: new.target.planet_id(),
        };
        t.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn get_favorite(&self, id: i32) -> Result<Option<Favorite>, AppError> {
        Ok(self.read().favorites.iter().find(|f| f.id == id).cloned())
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>, AppError> {
        Ok(self.read().favorites.clone())
    }

    async fn list_favorites_by_user(&self, user_id: i32) -> Result<Vec<Favorite>, AppError> {
        Ok(self
            .read()
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@b.com")).await.unwrap();
        let b = store.create_user(new_user("c@d.com")).await.unwrap();
        let p = store
            .create_planet(NewPlanet {
                name: "Hoth".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!((a.id, b.id, p.id), (1, 2, 1));
        assert_eq!(store.list_users().await.unwrap().len(), 2);
        assert_eq!(store.get_user(2).await.unwrap(), Some(b));
        assert_eq!(store.get_user(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn email_is_unique() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@b.com")).await.unwrap();
        let err = store.create_user(new_user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn favorites_require_existing_rows() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@b.com")).await.unwrap();
        let luke = store
            .create_character(NewCharacter {
                name: "Luke".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let missing_user = NewFavorite {
            user_id: 42,
            target: FavoriteTarget::Character(luke.id),
        };
        assert!(matches!(
            store.create_favorite(missing_user).await,
            Err(AppError::Conflict(ref m)) if m == "user does not exist"
        ));

        let missing_planet = NewFavorite {
            user_id: user.id,
            target: FavoriteTarget::Planet(9),
        };
        assert!(matches!(
            store.create_favorite(missing_planet).await,
            Err(AppError::Conflict(ref m)) if m == "planet does not exist"
        ));

        let fav = store
            .create_favorite(NewFavorite {
                user_id: user.id,
                target: FavoriteTarget::Character(luke.id),
            })
            .await
            .unwrap();
        assert_eq!(fav.character_id, Some(luke.id));
        assert_eq!(store.get_favorite(fav.id).await.unwrap(), Some(fav.clone()));
        assert_eq!(store.list_favorites().await.unwrap(), vec![fav]);
    }

    #[tokio::test]
    async fn duplicate_favorites_are_allowed() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@b.com")).await.unwrap();
        let other = store.create_user(new_user("x@y.com")).await.unwrap();
        let hoth = store
            .create_planet(NewPlanet {
                name: "Hoth".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        for uid in [user.id, user.id, other.id] {
            store
                .create_favorite(NewFavorite {
                    user_id: uid,
                    target: FavoriteTarget::Planet(hoth.id),
                })
                .await
                .unwrap();
        }
        let mine = store.list_favorites_by_user(user.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|f| f.planet_id == Some(hoth.id)));
    }
}
