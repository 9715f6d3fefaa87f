use super::key::StoreKey;
use super::record::StoredRecord;
use compact_str::{format_compact, CompactString};
use dashmap::DashMap;
use ferrous_doh_application::ports::{AnswerStore, StoreStats};
use ferrous_doh_domain::Record;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::{debug, info};

const DEFAULT_MAX_ENTRIES: usize = 1024;

type PartitionCache = LruCache<StoreKey, StoredRecord, FxBuildHasher>;
type Partition = Mutex<PartitionCache>;

/// One LRU-bounded TTL cache per upstream `(port, host)`.
///
/// Partitions are created on first insert and shared by every request that
/// targets the same endpoint port. Expired records are swept lazily on read.
pub struct PartitionedAnswerStore {
    partitions: DashMap<CompactString, Arc<Partition>, FxBuildHasher>,
    max_entries: NonZeroUsize,
}

impl PartitionedAnswerStore {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);

        info!(max_entries = max_entries.get(), "Initializing answer store");

        Self {
            partitions: DashMap::with_hasher(FxBuildHasher),
            max_entries,
        }
    }

    #[inline]
    fn partition_key(port: u16, host: &str) -> CompactString {
        format_compact!("{}:{}", port, host)
    }

    fn existing(&self, port: u16, host: &str) -> Option<Arc<Partition>> {
        self.partitions
            .get(&Self::partition_key(port, host))
            .map(|entry| Arc::clone(entry.value()))
    }

    fn get_or_create(&self, port: u16, host: &str) -> Arc<Partition> {
        let key = Self::partition_key(port, host);
        let entry = self.partitions.entry(key).or_insert_with(|| {
            debug!(port, host, "Creating answer store partition");
            Arc::new(Mutex::new(LruCache::with_hasher(
                self.max_entries,
                FxBuildHasher,
            )))
        });
        Arc::clone(entry.value())
    }
}

impl Default for PartitionedAnswerStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

fn lock(partition: &Partition) -> MutexGuard<'_, PartitionCache> {
    partition.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AnswerStore for PartitionedAnswerStore {
    fn get(&self, port: u16, host: &str, name: &str) -> Vec<Record> {
        let Some(partition) = self.existing(port, host) else {
            return Vec::new();
        };

        let now = Instant::now();
        let mut cache = lock(&partition);
        let mut live = Vec::new();
        let mut expired = Vec::new();

        for (key, stored) in cache.iter() {
            if !key.matches_name(name) {
                continue;
            }
            if stored.is_live(now) {
                live.push(stored.snapshot(now));
            } else {
                expired.push(key.clone());
            }
        }

        for key in &expired {
            cache.pop(key);
        }

        live
    }

    fn has(&self, port: u16, host: &str, name: &str, record: &Record) -> bool {
        let Some(partition) = self.existing(port, host) else {
            return false;
        };

        let key = StoreKey::new(name, &record.data);
        let mut cache = lock(&partition);

        match cache.peek(&key) {
            Some(stored) if stored.is_live(Instant::now()) => true,
            Some(_) => {
                cache.pop(&key);
                false
            }
            None => false,
        }
    }

    fn set(&self, port: u16, host: &str, name: &str, record: Record, ttl_ms: u64) {
        let partition = self.get_or_create(port, host);
        let key = StoreKey::new(name, &record.data);
        let stored = StoredRecord::new(record, ttl_ms, Instant::now());

        let displaced = lock(&partition).push(key, stored);
        if let Some((evicted, _)) = displaced {
            debug!(port, host, name = evicted.name(), "Answer store entry displaced");
        }
    }

    fn remove(&self, port: u16, host: &str, name: &str, record: &Record) -> bool {
        let Some(partition) = self.existing(port, host) else {
            return false;
        };

        let key = StoreKey::new(name, &record.data);
        let removed = lock(&partition).pop(&key);
        removed.is_some()
    }

    fn reset(&self) {
        self.partitions.clear();
    }

    fn stats(&self) -> StoreStats {
        let now = Instant::now();
        let records = self
            .partitions
            .iter()
            .map(|entry| {
                lock(entry.value())
                    .iter()
                    .filter(|(_, stored)| stored.is_live(now))
                    .count()
            })
            .sum();

        StoreStats {
            partitions: self.partitions.len(),
            records,
        }
    }
}
