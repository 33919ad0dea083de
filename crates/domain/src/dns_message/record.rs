use super::name::{decode_name, encode_name_into};
use super::wire::{read_u16, read_u32};
use super::{CLASS_IN, TYPE_A};
use crate::DomainError;
use std::net::Ipv4Addr;

/// RDLENGTH of the only RDATA shape this codec carries: a 4-byte IPv4 address.
pub const A_RDLENGTH: u16 = 4;

/// TYPE, CLASS, TTL, RDLENGTH and RDATA following the owner name.
const RECORD_TRAILER_LEN: usize = 14;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Vec<String>,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: u32,
}

impl ResourceRecord {
    /// An A/IN record for `name` pointing at `address`.
    pub fn a(name: Vec<String>, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            name,
            rtype: TYPE_A,
            class: CLASS_IN,
            ttl,
            rdlength: A_RDLENGTH,
            rdata: u32::from(address),
        }
    }

    pub fn ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.rdata)
    }

    pub fn name(&self) -> String {
        self.name.join(".")
    }

    /// RDLENGTH is always written as 4, whatever the field holds.
    pub fn pack_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        encode_name_into(&self.name, out)?;
        out.extend_from_slice(&self.rtype.to_be_bytes());
        out.extend_from_slice(&self.class.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&A_RDLENGTH.to_be_bytes());
        out.extend_from_slice(&self.rdata.to_be_bytes());
        Ok(())
    }

    pub fn pack(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::new();
        self.pack_into(&mut out)?;
        Ok(out)
    }

    pub fn unpack(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = decode_name(buf, offset)?;
        let rtype = read_u16(buf, pos, "record TYPE")?;
        let class = read_u16(buf, pos + 2, "record CLASS")?;
        let ttl = read_u32(buf, pos + 4, "record TTL")?;
        let rdlength = read_u16(buf, pos + 8, "record RDLENGTH")?;
        if rdlength != A_RDLENGTH {
            return Err(DomainError::MalformedHeader(format!(
                "unsupported RDLENGTH {} at offset {}, only {}-byte RDATA is carried",
                rdlength,
                pos + 8,
                A_RDLENGTH
            )));
        }
        let rdata = read_u32(buf, pos + 10, "record RDATA")?;

        Ok((
            Self {
                name,
                rtype,
                class,
                ttl,
                rdlength,
                rdata,
            },
            pos + RECORD_TRAILER_LEN,
        ))
    }
}

/// One entry of the answer section. Decoding always yields a single record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub records: Vec<ResourceRecord>,
}

impl Answer {
    pub fn single(record: ResourceRecord) -> Self {
        Self {
            records: vec![record],
        }
    }

    pub fn first(&self) -> Option<&ResourceRecord> {
        self.records.first()
    }

    pub fn pack_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        for record in &self.records {
            record.pack_into(out)?;
        }
        Ok(())
    }

    pub fn unpack(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (record, next) = ResourceRecord::unpack(buf, offset)?;
        Ok((Self::single(record), next))
    }
}
