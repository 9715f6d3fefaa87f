use ferrous_doh_domain::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub partitions: usize,
    pub records: usize,
}

/// TTL-bounded answer cache, partitioned per upstream `(port, host)`.
///
/// Two records share a slot when their lower-cased name and payload match.
/// Expired records are never returned by `get` or reported by `has`.
pub trait AnswerStore: Send + Sync {
    /// Live records of the partition whose name equals `name`.
    fn get(&self, port: u16, host: &str, name: &str) -> Vec<Record>;

    fn has(&self, port: u16, host: &str, name: &str, record: &Record) -> bool;

    /// Inserts or refreshes `record`, expiring it after `ttl_ms` milliseconds.
    fn set(&self, port: u16, host: &str, name: &str, record: Record, ttl_ms: u64);

    fn remove(&self, port: u16, host: &str, name: &str, record: &Record) -> bool;

    /// Drops every partition.
    fn reset(&self);

    fn stats(&self) -> StoreStats;
}
