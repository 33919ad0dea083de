use super::forward_query::ForwardQueryUseCase;
use super::stub_answer::respond;
use ferrous_relay_domain::{DnsMessage, DomainError};
use std::time::Instant;
use tracing::debug;

/// Full per-datagram pipeline: decode, answer or forward, encode.
pub struct HandleDnsQueryUseCase {
    forward: Option<ForwardQueryUseCase>,
}

impl HandleDnsQueryUseCase {
    /// Answers every query with the stub responder.
    pub fn stub() -> Self {
        Self { forward: None }
    }

    pub fn forwarding(forward: ForwardQueryUseCase) -> Self {
        Self {
            forward: Some(forward),
        }
    }

    pub fn is_forwarding(&self) -> bool {
        self.forward.is_some()
    }

    /// Returns the encoded reply for one raw query datagram.
    ///
    /// On error the datagram gets no reply at all.
    pub async fn execute(&self, datagram: &[u8]) -> Result<Vec<u8>, DomainError> {
        let start = Instant::now();

        let query = DnsMessage::decode(datagram)?;
        debug!(
            id = query.header.id,
            opcode = query.header.opcode,
            questions = query.questions.len(),
            "DNS query decoded"
        );

        let response = self.resolve(&query).await?;
        let bytes = response.encode()?;

        debug!(
            id = response.header.id,
            rcode = response.header.rcode,
            answers = response.answers.len(),
            bytes = bytes.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "DNS response encoded"
        );

        Ok(bytes)
    }

    pub async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        match &self.forward {
            Some(forward) => forward.execute(query).await,
            None => Ok(respond(query)),
        }
    }
}
