use super::name::{decode_name, encode_name_into, labels_from_name};
use super::wire::read_u16;
use crate::DomainError;

/// Bytes following the name: TYPE and CLASS.
const QUESTION_TRAILER_LEN: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    pub labels: Vec<String>,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(labels: Vec<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            labels,
            qtype,
            qclass,
        }
    }

    /// Builds a question from a dotted name such as `"google.com"`.
    pub fn for_name(name: &str, qtype: u16, qclass: u16) -> Self {
        Self::new(labels_from_name(name), qtype, qclass)
    }

    /// Dotted form of the queried name, without trailing dot.
    pub fn name(&self) -> String {
        self.labels.join(".")
    }

    pub fn pack(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::new();
        self.pack_into(&mut out)?;
        Ok(out)
    }

    pub fn pack_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        encode_name_into(&self.labels, out)?;
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
        Ok(())
    }

    /// Decodes a question at `offset`, returning it with the offset past it.
    pub fn unpack(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (labels, pos) = decode_name(buf, offset)?;
        let qtype = read_u16(buf, pos, "question TYPE")?;
        let qclass = read_u16(buf, pos + 2, "question CLASS")?;

        Ok((
            Self {
                labels,
                qtype,
                qclass,
            },
            pos + QUESTION_TRAILER_LEN,
        ))
    }
}
