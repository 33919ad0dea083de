pub mod server;
pub mod transport;

pub use server::{DnsServerHandler, UdpDnsServer};
pub use transport::{resolve_upstream, UdpForwarder};
