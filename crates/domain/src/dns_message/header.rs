use crate::DomainError;
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Unpacked DNS message header.
///
/// ```text
///   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// |                    QDCOUNT                    |
/// |                    ANCOUNT                    |
/// |                    NSCOUNT                    |
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// `opcode` and `rcode` are 4-bit fields and `z` is 3 bits wide; packing
/// masks them to that width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn pack(&self) -> [u8; HEADER_SIZE] {
        let mut data = [0u8; HEADER_SIZE];
        data[0..2].copy_from_slice(&self.id.to_be_bytes());
        data[2] = u8::from(self.qr) << 7
            | (self.opcode & 0x0F) << 3
            | u8::from(self.aa) << 2
            | u8::from(self.tc) << 1
            | u8::from(self.rd);
        data[3] = u8::from(self.ra) << 7 | (self.z & 0x07) << 4 | (self.rcode & 0x0F);
        data[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        data[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        data[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        data[10..12].copy_from_slice(&self.arcount.to_be_bytes());
        data
    }

    /// Unpacks a header from exactly [`HEADER_SIZE`] bytes.
    pub fn unpack(data: &[u8]) -> Result<Self, DomainError> {
        if data.len() != HEADER_SIZE {
            return Err(DomainError::MalformedHeader(format!(
                "header must be {} bytes, got {}",
                HEADER_SIZE,
                data.len()
            )));
        }

        Ok(Self {
            id: u16::from_be_bytes([data[0], data[1]]),
            qr: data[2] >> 7 == 1,
            opcode: (data[2] >> 3) & 0x0F,
            aa: (data[2] >> 2) & 0x01 == 1,
            tc: (data[2] >> 1) & 0x01 == 1,
            rd: data[2] & 0x01 == 1,
            ra: data[3] >> 7 == 1,
            z: (data[3] >> 4) & 0x07,
            rcode: data[3] & 0x0F,
            qdcount: u16::from_be_bytes([data[4], data[5]]),
            ancount: u16::from_be_bytes([data[6], data[7]]),
            nscount: u16::from_be_bytes([data[8], data[9]]),
            arcount: u16::from_be_bytes([data[10], data[11]]),
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DNS Header:")?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "QR: {}", u8::from(self.qr))?;
        writeln!(f, "OPCODE: {}", self.opcode)?;
        writeln!(f, "AA: {}", u8::from(self.aa))?;
        writeln!(f, "TC: {}", u8::from(self.tc))?;
        writeln!(f, "RD: {}", u8::from(self.rd))?;
        writeln!(f, "RA: {}", u8::from(self.ra))?;
        writeln!(f, "Z: {}", self.z)?;
        writeln!(f, "RCODE: {}", self.rcode)?;
        writeln!(f, "QDCOUNT: {}", self.qdcount)?;
        writeln!(f, "ANCOUNT: {}", self.ancount)?;
        writeln!(f, "NSCOUNT: {}", self.nscount)?;
        write!(f, "ARCOUNT: {}", self.arcount)
    }
}
