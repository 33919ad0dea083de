//! Ferrous Relay Domain Layer
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod upstream;

pub use config::{CliOverrides, Config, DispatchMode};
pub use dns_message::{
    Answer, DnsMessage, Header, Question, ResourceRecord, ResponseCode, CLASS_IN, OPCODE_QUERY,
    TYPE_A,
};
pub use errors::DomainError;
pub use upstream::UpstreamAddr;
