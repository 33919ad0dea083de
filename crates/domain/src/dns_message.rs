//! DNS wire model and codec (RFC 1035 §4 subset: header, question, answer).
//!
//! Every decoder takes `(buffer, offset)` and returns the decoded value with
//! the offset just past it, so sections chain without shared cursor state.

pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
mod wire;

pub use header::{Header, HEADER_SIZE};
pub use message::DnsMessage;
pub use name::{decode_name, encode_name, labels_from_name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::Question;
pub use record::{Answer, ResourceRecord, A_RDLENGTH};

/// OPCODE of a standard query. Every other value is unsupported.
pub const OPCODE_QUERY: u8 = 0;

/// TYPE value of an A (IPv4 host address) record.
pub const TYPE_A: u16 = 1;

/// CLASS value of the Internet class.
pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    NotImplemented,
}

impl ResponseCode {
    pub fn as_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::NotImplemented => 4,
        }
    }
}
