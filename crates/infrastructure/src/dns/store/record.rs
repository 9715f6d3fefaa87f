use ferrous_doh_domain::Record;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub record: Record,
    pub expires_at: Instant,
}

impl StoredRecord {
    pub fn new(record: Record, ttl_ms: u64, now: Instant) -> Self {
        Self {
            record,
            expires_at: now + Duration::from_millis(ttl_ms),
        }
    }

    #[inline]
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Whole seconds left, rounded up so a live record never reports zero.
    pub fn remaining_ttl_secs(&self, now: Instant) -> u32 {
        let remaining = self.expires_at.saturating_duration_since(now).as_millis();
        remaining.div_ceil(1000).min(u32::MAX as u128) as u32
    }

    /// The stored record with its TTL replaced by the time left.
    pub fn snapshot(&self, now: Instant) -> Record {
        let mut record = self.record.clone();
        record.ttl = self.remaining_ttl_secs(now);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_remaining_ttl_rounds_up() {
        let now = Instant::now();
        let stored = StoredRecord::new(Record::a("a.com", 2, Ipv4Addr::LOCALHOST), 1_500, now);

        assert_eq!(stored.remaining_ttl_secs(now), 2);
        assert_eq!(stored.remaining_ttl_secs(now + Duration::from_millis(600)), 1);
        assert!(!stored.is_live(now + Duration::from_millis(1_500)));
    }
}
