pub mod mock_forwarder;

#[allow(unused_imports)]
pub use mock_forwarder::{query, MockForwarder, Scripted};
