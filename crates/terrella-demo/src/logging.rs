//! Tracing setup for the demo binary.
//!
//! Libraries only emit `tracing` events; installing the subscriber is the
//! binary's job. `RUST_LOG` wins over the configured filter when set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber with the given default filter.
pub fn init(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_timer(fmt::time::uptime()),
        )
        .init();
}
