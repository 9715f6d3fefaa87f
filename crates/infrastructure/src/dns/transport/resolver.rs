use ferrous_doh_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Resolves an endpoint host to every socket address it maps to.
///
/// IP literals short-circuit without touching the system resolver.
pub async fn resolve_all(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let target = format!("{}:{}", host, port);

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UpstreamTransport {
            server: target.clone(),
            reason: format!("resolution failed: {}", e),
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::UpstreamTransport {
            server: target,
            reason: "no addresses found".to_string(),
        });
    }

    Ok(addrs)
}
