//! DNS-over-HTTPS client (RFC 8484): POSTs wire-format queries to a gateway.

use crate::dns::codec::wire;
use ferrous_doh_domain::{DnsMessage, DomainError, Question};
use std::time::Duration;
use tracing::debug;

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

pub struct DohClient {
    http: reqwest::Client,
    url: String,
}

impl DohClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Builds a recursive query with a random id and sends it.
    pub async fn query(&self, questions: Vec<Question>) -> Result<DnsMessage, DomainError> {
        let query = DnsMessage::query(fastrand::u16(..), questions);
        let packet = wire::encode(&query)?;
        self.request(packet).await
    }

    /// Sends an already encoded query packet.
    pub async fn request(&self, packet: Vec<u8>) -> Result<DnsMessage, DomainError> {
        debug!(url = %self.url, message_len = packet.len(), "Sending DoH query");

        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(packet)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamTransport {
                server: self.url.clone(),
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(url = %self.url, response_len = body.len(), "DoH response received");

        wire::decode(&body).map(|decoded| decoded.message)
    }

    fn transport_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::TransportTimeout {
                server: self.url.clone(),
            }
        } else {
            DomainError::UpstreamTransport {
                server: self.url.clone(),
                reason: e.to_string(),
            }
        }
    }
}
