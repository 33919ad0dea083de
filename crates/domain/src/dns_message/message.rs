use super::header::{Header, HEADER_SIZE};
use super::question::Question;
use super::record::Answer;
use crate::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl DnsMessage {
    /// Header, then every question, then every answer's records, in order.
    ///
    /// The header is written as held; counts are not recomputed.
    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&self.header.pack());
        for question in &self.questions {
            question.pack_into(&mut out)?;
        }
        for answer in &self.answers {
            answer.pack_into(&mut out)?;
        }
        Ok(out)
    }

    /// Decodes exactly QDCOUNT questions then ANCOUNT answers.
    ///
    /// Bytes after the answer section (authority and additional records) are
    /// not parsed.
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        let header_bytes = buf.get(..HEADER_SIZE).ok_or_else(|| {
            DomainError::MalformedHeader(format!(
                "message is {} bytes, shorter than the {}-byte header",
                buf.len(),
                HEADER_SIZE
            ))
        })?;
        let header = Header::unpack(header_bytes)?;

        let mut pos = HEADER_SIZE;

        // Counts come off the wire; the buffer length bounds what is worth
        // reserving.
        let mut questions = Vec::with_capacity(usize::from(header.qdcount).min(buf.len() / 5));
        for index in 0..header.qdcount {
            ensure_remaining(buf, pos, "QDCOUNT", header.qdcount, index)?;
            let (question, next) = Question::unpack(buf, pos)?;
            questions.push(question);
            pos = next;
        }

        let mut answers = Vec::with_capacity(usize::from(header.ancount).min(buf.len() / 15));
        for index in 0..header.ancount {
            ensure_remaining(buf, pos, "ANCOUNT", header.ancount, index)?;
            let (answer, next) = Answer::unpack(buf, pos)?;
            answers.push(answer);
            pos = next;
        }

        Ok(Self {
            header,
            questions,
            answers,
        })
    }
}

fn ensure_remaining(
    buf: &[u8],
    pos: usize,
    count_name: &str,
    count: u16,
    index: u16,
) -> Result<(), DomainError> {
    if pos >= buf.len() {
        return Err(DomainError::MalformedHeader(format!(
            "{} is {} but the message ends after {} entries",
            count_name, count, index
        )));
    }
    Ok(())
}
