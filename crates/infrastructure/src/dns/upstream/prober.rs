use super::exchange::UpstreamExchange;
use async_trait::async_trait;
use ferrous_doh_application::events::{GatewayEvent, GatewayEventEmitter};
use ferrous_doh_application::ports::{EndpointAnswer, ProbeReport, UpstreamProber};
use ferrous_doh_domain::{DnsMessage, DomainError, UpstreamEndpoint};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Queries every endpoint at once; each endpoint walks its primary then
/// secondary port until one of them gives a usable reply.
pub struct FailoverProber {
    endpoints: Arc<[UpstreamEndpoint]>,
    exchange: Arc<dyn UpstreamExchange>,
    emitter: GatewayEventEmitter,
}

impl FailoverProber {
    pub fn new(endpoints: Vec<UpstreamEndpoint>, exchange: Arc<dyn UpstreamExchange>) -> Self {
        Self {
            endpoints: endpoints.into(),
            exchange,
            emitter: GatewayEventEmitter::new_disabled(),
        }
    }

    pub fn with_events(mut self, emitter: GatewayEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    async fn probe_endpoint(
        &self,
        endpoint: &UpstreamEndpoint,
        query: &DnsMessage,
    ) -> Option<EndpointAnswer> {
        for port in endpoint.ports() {
            let (kind, error) = match self.exchange.exchange(&endpoint.host, port, query).await {
                Ok(response) if !response.response_code.is_server_error() => {
                    return Some(EndpointAnswer {
                        endpoint: endpoint.clone(),
                        port,
                        response,
                    });
                }
                Ok(response) => (
                    "rcode",
                    format!("server answered {}", response.response_code.as_status()),
                ),
                Err(e) if e.is_transport_error() => ("transport", e.to_string()),
                Err(e) => ("protocol", e.to_string()),
            };

            warn!(
                host = %endpoint.host,
                port,
                kind,
                error = %error,
                "Upstream attempt failed"
            );
            self.emitter.emit(GatewayEvent::UpstreamError {
                host: Arc::from(endpoint.host.as_str()),
                port,
                error,
            });
        }

        None
    }
}

#[async_trait]
impl UpstreamProber for FailoverProber {
    async fn probe(&self, query: &DnsMessage) -> Result<ProbeReport, DomainError> {
        let attempted = self.endpoints.len();

        let mut attempts: FuturesUnordered<_> = self
            .endpoints
            .iter()
            .map(|endpoint| self.probe_endpoint(endpoint, query))
            .collect();

        let mut report = ProbeReport::default();
        while let Some(outcome) = attempts.next().await {
            match outcome {
                Some(answer) => report.responses.push(answer),
                None => report.failed += 1,
            }
        }

        let succeeded = report.responses.len();
        debug!(attempted, succeeded, failed = report.failed, "Probe settled");

        if succeeded == 0 {
            return Err(DomainError::ProbeExhausted { attempted });
        }

        Ok(report)
    }
}
