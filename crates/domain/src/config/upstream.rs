use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream resolver; the stub responder answers when unset.
    #[serde(default)]
    pub resolver: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub dispatch: DispatchMode,
}

/// How split sub-queries are issued to the upstream.
///
/// Every sub-query carries the client's transaction ID. In `Concurrent` mode
/// each round trip still uses its own socket, so replies are told apart by
/// socket and not by ID. Results are combined in question order either way.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    #[default]
    Sequential,

    Concurrent,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            timeout_ms: default_timeout_ms(),
            dispatch: DispatchMode::default(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}
