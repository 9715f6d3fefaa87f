mod key;
mod record;
mod storage;

pub use key::StoreKey;
pub use record::StoredRecord;
pub use storage::PartitionedAnswerStore;
