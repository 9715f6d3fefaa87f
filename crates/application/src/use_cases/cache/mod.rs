pub mod get_stats;
pub mod reset;

pub use get_stats::GetCacheStatsUseCase;
pub use reset::ResetCacheUseCase;
