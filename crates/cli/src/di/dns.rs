use ferrous_relay_application::use_cases::{ForwardQueryUseCase, HandleDnsQueryUseCase};
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{resolve_upstream, DnsServerHandler, UdpForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let handler_use_case = match config.upstream_addr()? {
            Some(upstream) => {
                let timeout = config.upstream.timeout();
                let server_addr = resolve_upstream(&upstream, timeout).await?;

                info!(
                    upstream = %upstream,
                    resolved = %server_addr,
                    timeout_ms = config.upstream.timeout_ms,
                    dispatch = config.upstream.dispatch.as_str(),
                    "Forwarding mode: relaying queries to upstream resolver"
                );

                let forward =
                    ForwardQueryUseCase::new(Arc::new(UdpForwarder::new(server_addr)), timeout)
                        .with_dispatch(config.upstream.dispatch);
                HandleDnsQueryUseCase::forwarding(forward)
            }
            None => {
                info!("Stub mode: answering every question with a placeholder A record");
                HandleDnsQueryUseCase::stub()
            }
        };

        Ok(Self {
            handler_use_case: Arc::new(handler_use_case),
        })
    }

    pub fn handler(&self) -> DnsServerHandler {
        DnsServerHandler::new(self.handler_use_case.clone())
    }
}
