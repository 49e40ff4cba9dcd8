//! Router assembly: resource and common routes, CORS for any origin, request tracing,
//! a body size limit, and trailing-slash normalisation.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

/// The servable application. Serve with `axum::ServiceExt::into_make_service`.
pub type App = NormalizePath<Router>;

pub fn router(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wraps the router so `/users/` routes like `/users`. Must sit outside the router,
/// since routing happens before any router-level layer sees the request.
pub fn app(state: AppState, body_limit: usize) -> App {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, body_limit))
}
