use async_trait::async_trait;
use ferrous_relay_domain::DomainError;

/// Upstream resolver reached by one request/reply datagram exchange per call.
///
/// Implementations do not retry and do not enforce a deadline; callers wrap
/// the call in one and drop the future on expiry.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Sends `query` and waits for exactly one reply datagram.
    async fn round_trip(&self, query: &[u8]) -> Result<Vec<u8>, DomainError>;

    /// Upstream identity used in logs and errors.
    fn upstream(&self) -> String;
}
