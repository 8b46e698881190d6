//! crates/logging/src/config.rs
//! Verbosity configuration mapped onto the facl tracing targets.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// Tracing target for record parsing.
pub const PARSE_TARGET: &str = "facl::parse";
/// Tracing target for entry resolution.
pub const RESOLVE_TARGET: &str = "facl::resolve";
/// Tracing target for ACL sources and group lookups.
pub const SOURCE_TARGET: &str = "facl::source";
/// Tracing target for hierarchy walks.
pub const TRACE_TARGET: &str = "facl::trace";

/// A facl subsystem with its own tracing target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Subsystem {
    /// Record and entry parsing.
    Parse,
    /// Applicable-entry resolution.
    Resolve,
    /// ACL sources and group membership.
    Source,
    /// Hierarchy walks.
    Trace,
}

impl Subsystem {
    /// Every subsystem, in directive order.
    pub const ALL: [Self; 4] = [Self::Parse, Self::Resolve, Self::Source, Self::Trace];

    /// The tracing target events of this subsystem are emitted under.
    pub const fn target(self) -> &'static str {
        match self {
            Self::Parse => PARSE_TARGET,
            Self::Resolve => RESOLVE_TARGET,
            Self::Source => SOURCE_TARGET,
            Self::Trace => TRACE_TARGET,
        }
    }
}

/// Per-subsystem level filters derived from `-v`/`-q`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerbosityConfig {
    /// Level for events outside the facl targets.
    pub base: LevelFilter,
    /// Level for [`PARSE_TARGET`].
    pub parse: LevelFilter,
    /// Level for [`RESOLVE_TARGET`].
    pub resolve: LevelFilter,
    /// Level for [`SOURCE_TARGET`].
    pub source: LevelFilter,
    /// Level for [`TRACE_TARGET`].
    pub trace: LevelFilter,
}

impl Default for VerbosityConfig {
    fn default() -> Self {
        Self::uniform(LevelFilter::WARN)
    }
}

impl VerbosityConfig {
    /// Same level for the base and every subsystem.
    pub const fn uniform(level: LevelFilter) -> Self {
        Self {
            base: level,
            parse: level,
            resolve: level,
            source: level,
            trace: level,
        }
    }

    /// Maps a `-v` count to levels.
    ///
    /// 0 keeps warnings only; 1 adds info and the per-level walk events;
    /// 2 enables debug everywhere; 3 and above enable trace.
    pub fn from_verbose_level(level: u8) -> Self {
        match level {
            0 => Self::default(),
            1 => Self::uniform(LevelFilter::INFO).with(Subsystem::Trace, LevelFilter::DEBUG),
            2 => Self::uniform(LevelFilter::DEBUG),
            _ => Self::uniform(LevelFilter::TRACE),
        }
    }

    /// Errors only (`--quiet`).
    pub const fn quiet() -> Self {
        Self::uniform(LevelFilter::ERROR)
    }

    /// Level configured for `subsystem`.
    pub const fn level(&self, subsystem: Subsystem) -> LevelFilter {
        match subsystem {
            Subsystem::Parse => self.parse,
            Subsystem::Resolve => self.resolve,
            Subsystem::Source => self.source,
            Subsystem::Trace => self.trace,
        }
    }

    /// Sets the level for `subsystem`.
    pub fn set(&mut self, subsystem: Subsystem, level: LevelFilter) {
        match subsystem {
            Subsystem::Parse => self.parse = level,
            Subsystem::Resolve => self.resolve = level,
            Subsystem::Source => self.source = level,
            Subsystem::Trace => self.trace = level,
        }
    }

    /// Returns the configuration with `subsystem` set to `level`.
    #[must_use]
    pub fn with(mut self, subsystem: Subsystem, level: LevelFilter) -> Self {
        self.set(subsystem, level);
        self
    }

    /// Most verbose level enabled anywhere.
    pub fn max_level(&self) -> LevelFilter {
        Subsystem::ALL
            .iter()
            .map(|subsystem| self.level(*subsystem))
            .fold(self.base, Ord::max)
    }

    /// Filter directives understood by `tracing_subscriber::EnvFilter`.
    pub fn directives(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerbosityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for subsystem in Subsystem::ALL {
            write!(f, ",{}={}", subsystem.target(), self.level(subsystem))?;
        }
        Ok(())
    }
}
