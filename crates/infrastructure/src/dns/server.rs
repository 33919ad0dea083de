use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Receive buffer size for client datagrams; longer datagrams are truncated.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Bridges raw client datagrams to [`HandleDnsQueryUseCase`].
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Reply bytes for `datagram`, or `None` when it must be dropped.
    pub async fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        debug!(client = %client, bytes = datagram.len(), "DNS datagram received");

        match self.use_case.execute(datagram).await {
            Ok(reply) => Some(reply),
            Err(e) if e.is_decode_error() => {
                error!(client = %client, error = %e, "Dropping malformed DNS datagram");
                None
            }
            Err(e) if e.is_transport_failure() => {
                error!(client = %client, error = %e, "Upstream failed, dropping DNS datagram");
                None
            }
            Err(e) => {
                error!(client = %client, error = %e, "Dropping DNS datagram");
                None
            }
        }
    }
}

/// Serial UDP server: one datagram is fully answered before the next is read.
pub struct UdpDnsServer {
    socket: UdpSocket,
    handler: DnsServerHandler,
}

impl UdpDnsServer {
    /// Binds the listening socket. Must be called inside a Tokio runtime.
    pub fn bind(bind_addr: SocketAddr, handler: DnsServerHandler) -> io::Result<Self> {
        let socket = create_udp_socket(bind_addr)?;
        Ok(Self { socket, handler })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        let local_addr = self.socket.local_addr()?;
        info!(bind_address = %local_addr, "DNS server ready");

        let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(bind_address = %local_addr, "DNS server shutting down");
                    return Ok(());
                }
                received = self.serve_one(&mut recv_buf) => {
                    if let Err(e) = received {
                        error!(error = %e, "UDP socket error");
                    }
                }
            }
        }
    }

    async fn serve_one(&self, recv_buf: &mut [u8]) -> io::Result<()> {
        let (len, client) = self.socket.recv_from(recv_buf).await?;

        if let Some(reply) = self.handler.handle_datagram(&recv_buf[..len], client).await {
            self.socket.send_to(&reply, client).await?;
        }
        Ok(())
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
