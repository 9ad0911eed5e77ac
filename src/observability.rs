use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Output is JSON when the
/// config asks for it or `ENVIRONMENT=production`, pretty console otherwise.
pub fn init_observability(config: &ObservabilityConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let environment = std::env::var("ENVIRONMENT").ok();

    if json_output(&config.format, environment.as_deref()) {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::info!(
        service.name = "dinho",
        service.version = env!("CARGO_PKG_VERSION"),
        format = %config.format,
        "observability initialized"
    );

    Ok(())
}

fn json_output(format: &str, environment: Option<&str>) -> bool {
    format == "json" || environment == Some("production")
}
