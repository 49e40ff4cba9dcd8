//! HTTP handlers: one module per resource.

pub mod characters;
pub mod favorites;
pub mod index;
pub mod planets;
pub mod users;
