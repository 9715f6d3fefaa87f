use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// DoH endpoints, served on `/` and `/dns-query`.
pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::doh_get).post(handlers::doh_post))
        .route("/dns-query", get(handlers::doh_get).post(handlers::doh_post))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Admin endpoints, meant to be nested under `/api`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/cache/stats", get(handlers::get_cache_stats))
        .route("/cache/reset", post(handlers::reset_cache))
        .with_state(state)
}
