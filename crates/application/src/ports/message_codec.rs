use ferrous_doh_domain::{DnsMessage, DomainError};

/// DNS message codec for the wire format and the JSON representation.
pub trait MessageCodec: Send + Sync {
    /// Fails with `DomainError::Decode` on malformed input.
    fn decode(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError>;

    fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError>;

    /// JSON body with binary record payloads base64-encoded.
    fn encode_json(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError>;
}
