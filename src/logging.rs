//! Logging initialization for tools that host the registry.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary that loads the data.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level.
/// An unparsable configured level falls back to "info".
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    env_filter_with_env(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config)
}

fn env_filter_with_env(rust_log: Option<String>, config: &LogConfig) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(&config.level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let subscriber = tracing_subscriber::registry().with(env_filter(config));

    if config.json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    }
}
