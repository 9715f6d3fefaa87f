use crate::ports::AnswerStore;
use std::sync::Arc;
use tracing::info;

/// Discards every cache partition.
pub struct ResetCacheUseCase {
    store: Arc<dyn AnswerStore>,
}

impl ResetCacheUseCase {
    pub fn new(store: Arc<dyn AnswerStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self) {
        let before = self.store.stats();
        self.store.reset();
        info!(
            partitions = before.partitions,
            records = before.records,
            "Answer cache reset"
        );
    }
}
