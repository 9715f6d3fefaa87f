pub mod json;
pub mod record_type_map;
pub mod wire;

use ferrous_doh_application::ports::MessageCodec;
use ferrous_doh_domain::{DnsMessage, DomainError};

pub use record_type_map::RecordTypeMapper;
pub use wire::WireMessage;

/// `MessageCodec` backed by `hickory-proto` for wire format and `serde_json` for JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsCodec;

impl DnsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for DnsCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        wire::decode(bytes).map(|decoded| decoded.message)
    }

    fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        wire::encode(message)
    }

    fn encode_json(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        json::encode(message)
    }
}
