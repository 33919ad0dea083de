#![allow(dead_code)]

use ferrous_relay_application::use_cases::{ForwardQueryUseCase, HandleDnsQueryUseCase};
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{
    resolve_upstream, DnsServerHandler, UdpDnsServer, UdpForwarder,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// A relay running in-process on a loopback port.
pub struct Relay {
    pub addr: SocketAddr,
    shutdown: CancellationToken,
}

impl Relay {
    /// Wires the stack from `config` the way the binary does, binding port 0.
    pub async fn start(config: &Config) -> Self {
        let use_case = match config.upstream_addr().unwrap() {
            Some(upstream) => {
                let timeout = config.upstream.timeout();
                let server_addr = resolve_upstream(&upstream, timeout).await.unwrap();
                HandleDnsQueryUseCase::forwarding(
                    ForwardQueryUseCase::new(Arc::new(UdpForwarder::new(server_addr)), timeout)
                        .with_dispatch(config.upstream.dispatch),
                )
            }
            None => HandleDnsQueryUseCase::stub(),
        };

        let handler = DnsServerHandler::new(Arc::new(use_case));
        let bind: SocketAddr = format!("{}:0", config.server.bind_address).parse().unwrap();
        let server = UdpDnsServer::bind(bind, handler).unwrap();
        let addr = server.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        tokio::spawn(server.run(shutdown.clone()));

        Self { addr, shutdown }
    }

    pub async fn stub() -> Self {
        Self::start(&Config::default()).await
    }

    /// Sends `query` from a fresh client socket and waits briefly for a reply.
    pub async fn ask(&self, query: &[u8]) -> Option<Vec<u8>> {
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(query, self.addr).await.unwrap();

        let mut buf = vec![0u8; 1024];
        match tokio::time::timeout(Duration::from_millis(500), client.recv_from(&mut buf)).await {
            Ok(Ok((len, _))) => Some(buf[..len].to_vec()),
            _ => None,
        }
    }
}

impl Drop for Relay {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Loopback upstream that answers every query with one A record whose owner
/// name is a compression pointer to the question.
pub struct MockUpstream {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start(address: Ipv4Addr) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if len < 12 {
                                continue;
                            }
                            let mut response = buf[..len].to_vec();
                            response[2] |= 0x80;
                            response[3] = 0x80;
                            response[6..8].copy_from_slice(&[0x00, 0x01]);
                            response.extend_from_slice(&[
                                0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10,
                                0x00, 0x04,
                            ]);
                            response.extend_from_slice(&address.octets());
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Encodes a standard query (RD set) with one A/IN question per name.
pub fn query(id: u16, names: &[&str]) -> Vec<u8> {
    let mut bytes = vec![0u8; 12];
    bytes[0..2].copy_from_slice(&id.to_be_bytes());
    bytes[2] = 0x01;
    bytes[4..6].copy_from_slice(&(names.len() as u16).to_be_bytes());
    for name in names {
        for label in name.split('.') {
            bytes.push(label.len() as u8);
            bytes.extend_from_slice(label.as_bytes());
        }
        bytes.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);
    }
    bytes
}
