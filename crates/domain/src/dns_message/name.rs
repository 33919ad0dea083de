//! Domain name codec (RFC 1035 §3.1, §4.1.4).
//!
//! Decoding follows compression pointers; encoding always emits the
//! uncompressed form.

use crate::DomainError;

/// Maximum length of a single label in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of an encoded name, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

/// Pointer chains longer than this are rejected outright.
const MAX_COMPRESSION_JUMPS: usize = 128;

const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_TAG: u8 = 0xC0;

/// Decodes the name starting at `offset`.
///
/// Returns the labels and the offset just past the name as it appears at
/// `offset`: after the zero terminator, or after the two pointer bytes when
/// the name ends in a compression pointer.
///
/// A pointer must target an offset strictly below its own location. A
/// pointer loop therefore has to pass through literal labels, which the
/// [`MAX_NAME_LEN`] bound cuts off.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(Vec<String>, usize), DomainError> {
    let mut labels = Vec::new();
    // The terminating zero byte counts toward the encoded length.
    let mut wire_len = 1;
    let next = decode_labels(buf, offset, &mut labels, &mut wire_len, 0)?;
    Ok((labels, next))
}

fn decode_labels(
    buf: &[u8],
    offset: usize,
    labels: &mut Vec<String>,
    wire_len: &mut usize,
    jumps: usize,
) -> Result<usize, DomainError> {
    let mut pos = offset;

    loop {
        let len_byte = *buf
            .get(pos)
            .ok_or_else(|| DomainError::malformed_name(pos, "name runs past end of buffer"))?;

        match len_byte & LABEL_TYPE_MASK {
            0x00 if len_byte == 0 => return Ok(pos + 1),
            0x00 => {
                let len = usize::from(len_byte);
                let text = buf.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                    DomainError::malformed_name(
                        pos,
                        format!("label of {} bytes overruns buffer of {}", len, buf.len()),
                    )
                })?;

                *wire_len += 1 + len;
                if *wire_len > MAX_NAME_LEN {
                    return Err(DomainError::malformed_name(
                        pos,
                        format!("name exceeds {} bytes", MAX_NAME_LEN),
                    ));
                }

                if !text.is_ascii() {
                    return Err(DomainError::malformed_name(pos, "label is not ASCII"));
                }
                labels.push(text.iter().map(|&b| char::from(b)).collect());
                pos += 1 + len;
            }
            POINTER_TAG => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::malformed_name(pos, "compression pointer is truncated")
                })?;
                let target = usize::from(len_byte & !LABEL_TYPE_MASK) << 8 | usize::from(low);

                if target >= pos {
                    return Err(DomainError::malformed_name(
                        pos,
                        format!("compression pointer to {} does not point backwards", target),
                    ));
                }
                if jumps >= MAX_COMPRESSION_JUMPS {
                    return Err(DomainError::malformed_name(
                        pos,
                        format!("more than {} compression pointers", MAX_COMPRESSION_JUMPS),
                    ));
                }

                decode_labels(buf, target, labels, wire_len, jumps + 1)?;
                return Ok(pos + 2);
            }
            _ => {
                return Err(DomainError::malformed_name(
                    pos,
                    format!("reserved label type 0x{:02X}", len_byte),
                ));
            }
        }
    }
}

/// Encodes `labels` as uncompressed length-prefixed labels plus a zero byte.
pub fn encode_name<S: AsRef<str>>(labels: &[S]) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(MAX_NAME_LEN);
    encode_name_into(labels, &mut out)?;
    Ok(out)
}

pub(super) fn encode_name_into<S: AsRef<str>>(
    labels: &[S],
    out: &mut Vec<u8>,
) -> Result<(), DomainError> {
    let start = out.len();

    for label in labels {
        let label = label.as_ref().as_bytes();
        if !label.is_ascii() {
            let at = out.len() - start;
            out.truncate(start);
            return Err(DomainError::malformed_name(at, "label is not ASCII"));
        }
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            let at = out.len() - start;
            out.truncate(start);
            return Err(DomainError::malformed_name(
                at,
                format!("label length {} outside 1..={}", label.len(), MAX_LABEL_LEN),
            ));
        }
        // Bounded by MAX_LABEL_LEN above.
        out.push(label.len() as u8);
        out.extend_from_slice(label);
    }
    out.push(0);

    let encoded = out.len() - start;
    if encoded > MAX_NAME_LEN {
        out.truncate(start);
        return Err(DomainError::malformed_name(
            0,
            format!("encoded name is {} bytes, limit is {}", encoded, MAX_NAME_LEN),
        ));
    }
    Ok(())
}

/// Splits a dotted name (`"google.com"` or `"google.com."`) into labels.
pub fn labels_from_name(name: &str) -> Vec<String> {
    name.trim_end_matches('.')
        .split('.')
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .collect()
}
