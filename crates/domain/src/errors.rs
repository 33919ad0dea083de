use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),
}

impl DomainError {
    pub fn malformed_name(offset: usize, reason: impl Into<String>) -> Self {
        DomainError::MalformedName {
            offset,
            reason: reason.into(),
        }
    }

    pub fn transport(server: impl ToString, reason: impl ToString) -> Self {
        DomainError::TransportFailure {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors raised while decoding or encoding wire data.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedHeader(_) | DomainError::MalformedName { .. }
        )
    }

    /// Deadline expiry counts as a transport failure.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            DomainError::TransportFailure { .. } | DomainError::TransportTimeout { .. }
        )
    }
}
