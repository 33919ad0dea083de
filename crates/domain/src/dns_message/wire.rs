use crate::DomainError;

fn field<'a>(buf: &'a [u8], pos: usize, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
    buf.get(pos..pos + len).ok_or_else(|| {
        DomainError::MalformedHeader(format!(
            "{} at offset {} needs {} bytes, buffer has {}",
            what,
            pos,
            len,
            buf.len()
        ))
    })
}

pub(super) fn read_u16(buf: &[u8], pos: usize, what: &str) -> Result<u16, DomainError> {
    let bytes = field(buf, pos, 2, what)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub(super) fn read_u32(buf: &[u8], pos: usize, what: &str) -> Result<u32, DomainError> {
    let bytes = field(buf, pos, 4, what)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
