use ferrous_relay_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Turns a configured upstream into a socket address.
///
/// Literal addresses pass through; hostnames are looked up once, taking the
/// first address returned.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match upstream.unresolved_parts() {
        Some(parts) => parts,
        None => {
            return upstream.socket_addr().ok_or_else(|| {
                DomainError::InvalidUpstreamAddress(upstream.to_string())
            })
        }
    };

    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| {
            DomainError::InvalidUpstreamAddress(format!("resolution of {} failed: {}", target, e))
        })?;

    let addr = addrs.next().ok_or_else(|| {
        DomainError::InvalidUpstreamAddress(format!("no addresses found for {}", target))
    })?;

    debug!(upstream = %target, resolved = %addr, "Upstream hostname resolved");
    Ok(addr)
}
