use crate::{
    dto::{CacheResetResponse, CacheStatsResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.get_cache_stats.execute();

    debug!(
        partitions = stats.partitions,
        records = stats.records,
        "Cache statistics retrieved"
    );

    Json(stats.into())
}

#[instrument(skip(state), name = "api_reset_cache")]
pub async fn reset_cache(State(state): State<AppState>) -> Json<CacheResetResponse> {
    state.reset_cache.execute();

    Json(CacheResetResponse {
        success: true,
        message: "Answer cache cleared".to_string(),
    })
}
