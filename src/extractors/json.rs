//! JSON body extractor whose rejections use the API's error body.

use crate::error::ErrorBody;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, with the same rejection statuses (400 syntax, 415 content type,
/// 422 wrong shape, 413 too large) but an `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let status = rejection.status();
                tracing::debug!(status = %status, "rejected request body");
                Err((status, Json(ErrorBody { error: rejection.body_text() })).into_response())
            }
        }
    }
}
