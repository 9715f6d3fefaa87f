pub mod cache;
pub mod gateway;

pub use cache::{GetCacheStatsUseCase, ResetCacheUseCase};
pub use gateway::{
    AnswerSource, HandleDohRequestUseCase, Resolution, ResolveQueryUseCase,
};
