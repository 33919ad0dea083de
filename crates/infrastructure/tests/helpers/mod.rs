pub mod builders;

#[allow(unused_imports)]
pub use builders::{query_bytes, spawn_server, stub_server, QueryBuilder};
#[allow(unused_imports)]
pub use dns_server_mock::{MockDnsServer, MockReply};
