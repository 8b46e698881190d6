//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for the facl binary.
//!
//! Events are written to standard error by the `tracing-subscriber` fmt
//! layer. The filter comes from [`VerbosityConfig::directives`] unless
//! `RUST_LOG` holds a valid filter, which then wins.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "facl::trace", "walking");
//! ```

use std::io;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::VerbosityConfig;

/// Environment variable whose filter overrides the verbosity flags.
pub const LOG_ENV: &str = "RUST_LOG";

/// Builds the event filter for `config`, preferring `env_override` when it
/// parses as a filter.
pub fn filter_for(config: &VerbosityConfig, env_override: Option<&str>) -> EnvFilter {
    env_override
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directives()))
}

/// Builds a subscriber writing plain-text events to `writer`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer)
}

/// Installs the global subscriber writing to standard error.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let env = std::env::var(LOG_ENV).ok();
    let filter = filter_for(&config, env.as_deref());

    subscriber(filter, io::stderr).try_init().is_ok()
}
