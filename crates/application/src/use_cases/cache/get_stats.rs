use crate::ports::{AnswerStore, StoreStats};
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    store: Arc<dyn AnswerStore>,
}

impl GetCacheStatsUseCase {
    pub fn new(store: Arc<dyn AnswerStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> StoreStats {
        self.store.stats()
    }
}
