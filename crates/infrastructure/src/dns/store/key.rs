use compact_str::CompactString;
use ferrous_doh_domain::RecordData;

/// Slot identity inside a partition: lower-cased owner name plus payload.
///
/// The record type and TTL are deliberately not part of the key, so the same
/// payload re-announced with a fresh TTL maps onto the existing slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreKey {
    name: CompactString,
    data: RecordData,
}

impl StoreKey {
    pub fn new(name: &str, data: &RecordData) -> Self {
        Self {
            name: CompactString::from(name.to_ascii_lowercase()),
            data: data.clone(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
