use async_trait::async_trait;
use ferrous_doh_domain::{DnsMessage, DomainError, UpstreamEndpoint};

/// A usable reply from one endpoint, tagged with the port that produced it.
#[derive(Debug, Clone)]
pub struct EndpointAnswer {
    pub endpoint: UpstreamEndpoint,
    pub port: u16,
    pub response: DnsMessage,
}

/// Outcome of a probe in which at least one endpoint answered.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    /// Usable replies in completion order.
    pub responses: Vec<EndpointAnswer>,

    /// Endpoints whose every port failed.
    pub failed: usize,
}

#[async_trait]
pub trait UpstreamProber: Send + Sync {
    /// Queries every endpoint concurrently, falling back to each endpoint's
    /// secondary port, and waits for all of them.
    ///
    /// Returns `DomainError::ProbeExhausted` when no endpoint produced a
    /// usable reply, including when none are configured.
    async fn probe(&self, query: &DnsMessage) -> Result<ProbeReport, DomainError>;
}
