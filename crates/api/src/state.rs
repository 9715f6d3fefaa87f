use ferrous_doh_application::use_cases::{
    GetCacheStatsUseCase, HandleDohRequestUseCase, ResetCacheUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub handle_doh: Arc<HandleDohRequestUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub reset_cache: Arc<ResetCacheUseCase>,
    pub upstream_count: usize,
}
