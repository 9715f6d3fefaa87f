use crate::dns::codec::wire;
use crate::dns::transport::{self, resolver, Protocol};
use async_trait::async_trait;
use ferrous_doh_application::events::{GatewayEvent, GatewayEventEmitter};
use ferrous_doh_domain::{DnsMessage, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// One query/response round trip against a single `host:port`.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        host: &str,
        port: u16,
        query: &DnsMessage,
    ) -> Result<DnsMessage, DomainError>;
}

/// Standard DNS over UDP, retried over TCP when the reply is truncated.
///
/// The whole attempt, including host resolution and the TCP retry, is
/// bounded by `timeout`.
pub struct NetworkExchange {
    timeout: Duration,
    emitter: GatewayEventEmitter,
}

impl NetworkExchange {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            emitter: GatewayEventEmitter::new_disabled(),
        }
    }

    pub fn with_events(mut self, emitter: GatewayEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    async fn round_trip(
        &self,
        host: &str,
        port: u16,
        query: &DnsMessage,
    ) -> Result<DnsMessage, DomainError> {
        let start = Instant::now();
        let query_bytes = wire::encode(query)?;

        let addrs = resolver::resolve_all(host, port, self.timeout).await?;
        let Some(&server_addr) = addrs.first() else {
            return Err(DomainError::UpstreamTransport {
                server: format!("{}:{}", host, port),
                reason: "no addresses found".to_string(),
            });
        };

        self.emitter.emit(GatewayEvent::SocketCreated {
            host: Arc::from(host),
            port,
        });

        let mut response =
            transport::send(Protocol::Udp, server_addr, &query_bytes, self.timeout).await?;
        let mut decoded = wire::decode(&response.bytes)?;

        if decoded.truncated {
            debug!(
                server = %server_addr,
                "Response truncated (TC bit), retrying via TCP"
            );

            let remaining = self
                .timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));

            response =
                transport::send(Protocol::Tcp, server_addr, &query_bytes, remaining).await?;
            decoded = wire::decode(&response.bytes)?;
        }

        let reply = decoded.message;
        if reply.id != query.id {
            return Err(DomainError::UpstreamTransport {
                server: server_addr.to_string(),
                reason: format!("reply id {} does not match query id {}", reply.id, query.id),
            });
        }

        debug!(
            server = %server_addr,
            protocol = response.protocol.as_str(),
            answers = reply.answers.len(),
            rcode = reply.response_code.as_status(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Upstream replied"
        );

        Ok(reply)
    }
}

#[async_trait]
impl UpstreamExchange for NetworkExchange {
    async fn exchange(
        &self,
        host: &str,
        port: u16,
        query: &DnsMessage,
    ) -> Result<DnsMessage, DomainError> {
        tokio::time::timeout(self.timeout, self.round_trip(host, port, query))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: format!("{}:{}", host, port),
            })?
    }
}
