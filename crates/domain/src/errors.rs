use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Failed to decode DNS message: {0}")]
    Decode(String),

    #[error("Failed to encode DNS message: {0}")]
    Encode(String),

    #[error("Could not parse upstream address: {0}")]
    ParseConfig(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Upstream {server} failed: {reason}")]
    UpstreamTransport { server: String, reason: String },

    #[error("Transport timeout querying {server}")]
    TransportTimeout { server: String },

    #[error("Probe failed: all {attempted} upstream endpoints exhausted")]
    ProbeExhausted { attempted: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Whether the failure came from the network rather than from the reply itself.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamTransport { .. } | DomainError::TransportTimeout { .. }
        )
    }
}
