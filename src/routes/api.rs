//! Resource routes.

use crate::handlers::{characters, favorites, index, planets, users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id/favorites", get(users::favorites))
        .route("/characters", get(characters::list).post(characters::create))
        .route("/characters/:id", get(characters::read))
        .route("/planets", get(planets::list).post(planets::create))
        .route("/planets/:id", get(planets::read))
        .route("/favorite/planet/:id", post(favorites::add_planet))
        .route("/favorite/character/:id", post(favorites::add_character))
        .with_state(state)
}
