//! Tracing/logging setup
//!
//! The subscriber is built from [`LoggingConfig`] and returned as a value;
//! only `main` installs it globally. Tests can scope their own subscriber with
//! `tracing::subscriber::with_default`.

use crate::config::{LogFormat, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter};

/// Build a subscriber writing to stdout
///
/// `RUST_LOG`, when set, takes precedence over the configured filter.
pub fn build_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    build_subscriber_with_writer(config, std::io::stdout)
}

/// Build a subscriber writing formatted events to `writer`
pub fn build_subscriber_with_writer<W>(
    config: &LoggingConfig,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        // JSON logging for production (better for log aggregation)
        LogFormat::Json => Box::new(
            registry.with(tracing_subscriber::fmt::layer().json().with_writer(writer)),
        ),
        LogFormat::Pretty => Box::new(
            registry.with(tracing_subscriber::fmt::layer().pretty().with_writer(writer)),
        ),
    }
}

/// Install the subscriber as the process-wide default
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(build_subscriber(config))?;
    Ok(())
}
