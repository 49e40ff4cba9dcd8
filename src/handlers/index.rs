use crate::response::message;
use axum::response::IntoResponse;

/// GET /
pub async fn index() -> impl IntoResponse {
    message("Star Wars API is running")
}
