pub mod cache;
pub mod doh;
pub mod health;

pub use cache::{CacheResetResponse, CacheStatsResponse};
pub use doh::{DohQueryParams, QuestionDto, QuestionsBody};
pub use health::HealthResponse;
