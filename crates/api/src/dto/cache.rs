use ferrous_doh_application::ports::StoreStats;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsResponse {
    pub partitions: usize,
    pub records: usize,
}

impl From<StoreStats> for CacheStatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            partitions: stats.partitions,
            records: stats.records,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheResetResponse {
    pub success: bool,
    pub message: String,
}
