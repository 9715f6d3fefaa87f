//! DNS over UDP (RFC 1035 §4.2.1). The socket is connected to the upstream,
//! so datagrams from any other source are dropped by the kernel.

use super::transport_error;
use ferrous_doh_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Largest reply accepted over UDP (EDNS(0) payload size).
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

fn unspecified_for(server: SocketAddr) -> SocketAddr {
    match server {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}

pub async fn exchange(server: SocketAddr, query: &[u8]) -> Result<Vec<u8>, DomainError> {
    let socket = UdpSocket::bind(unspecified_for(server))
        .await
        .map_err(|e| transport_error(server, format!("bind failed: {}", e)))?;

    socket
        .connect(server)
        .await
        .map_err(|e| transport_error(server, format!("connect failed: {}", e)))?;

    socket
        .send(query)
        .await
        .map_err(|e| transport_error(server, format!("send failed: {}", e)))?;

    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    let received = socket
        .recv(&mut buf)
        .await
        .map_err(|e| transport_error(server, format!("receive failed: {}", e)))?;

    buf.truncate(received);
    Ok(buf)
}
