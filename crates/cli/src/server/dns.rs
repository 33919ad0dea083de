use ferrous_relay_infrastructure::dns::{DnsServerHandler, UdpDnsServer};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind_addr, e))?;

    info!(bind_address = %socket_addr, "Starting DNS server");

    let server = UdpDnsServer::bind(socket_addr, handler)
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", socket_addr, e))?;
    server.run(shutdown).await?;

    Ok(())
}
