//! Plain DNS transports for upstream attempts. Every attempt owns its socket.

pub mod resolver;
pub mod tcp;
pub mod udp;

use ferrous_doh_domain::DomainError;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub protocol: Protocol,
}

/// Sends one wire-format query to `server` and waits at most `timeout` for the reply.
pub async fn send(
    protocol: Protocol,
    server: SocketAddr,
    query: &[u8],
    timeout: Duration,
) -> Result<TransportResponse, DomainError> {
    let attempt = async {
        match protocol {
            Protocol::Udp => udp::exchange(server, query).await,
            Protocol::Tcp => tcp::exchange(server, query).await,
        }
    };

    let bytes = tokio::time::timeout(timeout, attempt)
        .await
        .map_err(|_| timeout_error(server))??;

    debug!(
        server = %server,
        protocol = protocol.as_str(),
        query_len = query.len(),
        response_len = bytes.len(),
        "Transport round trip complete"
    );

    Ok(TransportResponse { bytes, protocol })
}

pub(crate) fn transport_error(server: SocketAddr, reason: impl fmt::Display) -> DomainError {
    DomainError::UpstreamTransport {
        server: server.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
