//! crates/logging/src/tracing_macros.rs
//! Convenience macros emitting debug events under the facl targets.
//!
//! Callers must depend on `tracing` directly.

/// Emit a record parsing event.
///
/// # Example
/// ```ignore
/// trace_parse!(entries = record.entries().len(), "parsed record");
/// ```
#[macro_export]
macro_rules! trace_parse {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::PARSE_TARGET, $($arg)*);
    };
}

/// Emit an entry resolution event.
///
/// # Example
/// ```ignore
/// trace_resolve!(principal = %name, "resolved via other");
/// ```
#[macro_export]
macro_rules! trace_resolve {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::RESOLVE_TARGET, $($arg)*);
    };
}

/// Emit an ACL source or group lookup event.
///
/// # Example
/// ```ignore
/// trace_source!(path = %path.display(), "running getfacl");
/// ```
#[macro_export]
macro_rules! trace_source {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::SOURCE_TARGET, $($arg)*);
    };
}

/// Emit a hierarchy walk event.
///
/// # Example
/// ```ignore
/// trace_walk!(path = %path.display(), permitted, "trace level");
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::TRACE_TARGET, $($arg)*);
    };
}
