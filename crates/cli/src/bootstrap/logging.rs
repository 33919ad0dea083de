use ferrous_relay_domain::config::LogFormat;
use ferrous_relay_domain::Config;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let level: LevelFilter = config.logging.level.parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level '{}' (expected trace, debug, info, warn, error or off)",
            config.logging.level
        )
    })?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match config.logging.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
    }

    Ok(())
}
