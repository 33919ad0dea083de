#![allow(dead_code)]
use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use ferrous_relay_domain::{DnsMessage, Header, Question, CLASS_IN, TYPE_A};
use ferrous_relay_infrastructure::dns::{DnsServerHandler, UdpDnsServer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct QueryBuilder {
    header: Header,
    questions: Vec<Question>,
}

impl QueryBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            header: Header {
                id,
                rd: true,
                ..Header::default()
            },
            questions: Vec::new(),
        }
    }

    pub fn question(mut self, name: &str) -> Self {
        self.questions.push(Question::for_name(name, TYPE_A, CLASS_IN));
        self
    }

    pub fn build(mut self) -> DnsMessage {
        self.header.qdcount = self.questions.len() as u16;
        DnsMessage {
            header: self.header,
            questions: self.questions,
            answers: Vec::new(),
        }
    }
}

pub fn query_bytes(id: u16, names: &[&str]) -> Vec<u8> {
    names
        .iter()
        .fold(QueryBuilder::new(id), |builder, name| builder.question(name))
        .build()
        .encode()
        .unwrap()
}

/// Binds a server on a loopback port and runs it until the token is cancelled.
pub fn spawn_server(
    use_case: HandleDnsQueryUseCase,
) -> (SocketAddr, CancellationToken, JoinHandle<std::io::Result<()>>) {
    let handler = DnsServerHandler::new(Arc::new(use_case));
    let server = UdpDnsServer::bind("127.0.0.1:0".parse().unwrap(), handler).unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(server.run(shutdown.clone()));
    (addr, shutdown, task)
}

pub fn stub_server() -> (SocketAddr, CancellationToken, JoinHandle<std::io::Result<()>>) {
    spawn_server(HandleDnsQueryUseCase::stub())
}
