#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the verbosity model shared by the facl crates: the
//! tracing targets each subsystem logs under, the mapping from `-v`/`-q`
//! to per-target level filters, and macros that emit events under those
//! targets.
//!
//! # Design
//!
//! [`VerbosityConfig`] stores one [`LevelFilter`](tracing::level_filters::LevelFilter)
//! per [`Subsystem`] and renders them as `EnvFilter` directives. With the
//! `subscriber` feature, [`init_tracing`] installs a stderr fmt subscriber
//! using those directives, or the `RUST_LOG` filter when one is set.
//!
//! Library crates only emit events; installing a subscriber is left to the
//! binary.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = VerbosityConfig::from_verbose_level(1);
//! assert_eq!(config.level(Subsystem::Trace), LevelFilter::DEBUG);
//! assert!(config.directives().contains("facl::trace=debug"));
//! ```

mod config;
#[cfg(feature = "subscriber")]
mod tracing_bridge;
mod tracing_macros;

pub use config::{
    PARSE_TARGET, RESOLVE_TARGET, SOURCE_TARGET, Subsystem, TRACE_TARGET, VerbosityConfig,
};
#[cfg(feature = "subscriber")]
pub use tracing_bridge::{LOG_ENV, filter_for, init_tracing, subscriber};
