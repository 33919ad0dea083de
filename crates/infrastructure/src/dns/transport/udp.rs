//! UDP round trips to the upstream resolver (RFC 1035 §4.2.1).
//!
//! Every call opens its own ephemeral socket, so concurrent sub-queries that
//! share a message ID cannot receive each other's replies. The caller owns the
//! deadline.

use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamForwarder;
use ferrous_relay_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest reply accepted from the upstream.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpForwarder {
    server_addr: SocketAddr,
}

impl UdpForwarder {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    fn failure(&self, action: &str, error: std::io::Error) -> DomainError {
        DomainError::transport(self.server_addr, format!("{}: {}", action, error))
    }
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn round_trip(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| self.failure("failed to bind UDP socket", e))?;

        // Connected sockets drop datagrams from any other source.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.failure("failed to connect UDP socket", e))?;

        let bytes_sent = socket
            .send(query)
            .await
            .map_err(|e| self.failure("failed to send UDP query", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| self.failure("failed to receive UDP response", e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }

    fn upstream(&self) -> String {
        self.server_addr.to_string()
    }
}
