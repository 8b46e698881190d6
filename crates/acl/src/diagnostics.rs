//! crates/acl/src/diagnostics.rs
//!
//! Diagnostics context threaded through the parser, resolver and tracer.
//!
//! Every recoverable condition (a malformed line, a missing header, an
//! unreachable ACL source) is reported as a [`Diagnostic`] to the
//! [`Diagnostics`] implementation supplied by the caller. The default
//! [`TracingDiagnostics`] forwards to `tracing`; tests substitute
//! [`CollectingDiagnostics`] to assert on exactly what was reported.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::EntryDefect;

pub use logging::{PARSE_TARGET, RESOLVE_TARGET, SOURCE_TARGET, TRACE_TARGET};

/// Metadata header expected in every ACL record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetadataField {
    /// `# file: `
    Path,
    /// `# owner: `
    Owner,
    /// `# group: `
    Group,
    /// `# flags: `
    Flags,
}

impl MetadataField {
    /// Header prefix introducing this field.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Path => "# file: ",
            Self::Owner => "# owner: ",
            Self::Group => "# group: ",
            Self::Flags => "# flags: ",
        }
    }
}

/// A recoverable condition observed while answering a query.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// An entry line was dropped; parsing continued.
    MalformedEntryLine {
        /// The dropped line.
        line: String,
        /// Why it was dropped.
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))]
        reason: EntryDefect,
    },
    /// A metadata header was absent; the field defaults to an empty string.
    MissingMetadata {
        /// The absent header.
        field: MetadataField,
    },
    /// An entry with an empty user/group name was parsed without record
    /// metadata to resolve the name from.
    UninitializedRecord {
        /// The entry line being parsed.
        line: String,
    },
    /// A block of a `getfacl -R` dump had no `# file: ` header and was dropped.
    HeaderlessDumpBlock {
        /// First line of the dropped block.
        first_line: String,
    },
    /// The ACL source could not provide a record; an empty record was used.
    UnavailableAclSource {
        /// Path whose record was requested.
        path: PathBuf,
        /// Rendered source error.
        reason: String,
    },
    /// Group membership could not be determined; an empty set was used.
    GroupLookupFailed {
        /// User whose groups were requested.
        user: String,
        /// Rendered lookup error.
        reason: String,
    },
    /// No entry of the record applies to the queried principal.
    NoApplicableAcl {
        /// Path of the record, when known.
        path: PathBuf,
    },
}

#[cfg(feature = "serde")]
fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: fmt::Display,
{
    serializer.collect_str(value)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEntryLine { line, reason } => {
                write!(f, "skipping ACL line '{line}': {reason}")
            }
            Self::MissingMetadata { field } => write!(
                f,
                "metadata pattern '{}' not found in FACL output",
                field.prefix()
            ),
            Self::UninitializedRecord { line } => {
                write!(f, "FACL not initialized before parsing ACLs: '{line}'")
            }
            Self::HeaderlessDumpBlock { first_line } => write!(
                f,
                "skipping dump block without a '{}' header starting at '{first_line}'",
                MetadataField::Path.prefix()
            ),
            Self::UnavailableAclSource { path, reason } => {
                write!(f, "no ACL available for {}: {reason}", path.display())
            }
            Self::GroupLookupFailed { user, reason } => {
                write!(f, "error retrieving groups for user {user}: {reason}")
            }
            Self::NoApplicableAcl { path } => {
                write!(f, "no applicable ACL entry for {}", path.display())
            }
        }
    }
}

/// Receiver for [`Diagnostic`] reports.
pub trait Diagnostics {
    /// Records one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` under the `facl::*` targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MalformedEntryLine { .. }
            | Diagnostic::MissingMetadata { .. }
            | Diagnostic::UninitializedRecord { .. } => {
                tracing::warn!(target: PARSE_TARGET, "{diagnostic}");
            }
            Diagnostic::HeaderlessDumpBlock { .. } | Diagnostic::UnavailableAclSource { .. } => {
                tracing::warn!(target: SOURCE_TARGET, "{diagnostic}");
            }
            Diagnostic::GroupLookupFailed { .. } => {
                tracing::warn!(target: RESOLVE_TARGET, "{diagnostic}");
            }
            Diagnostic::NoApplicableAcl { .. } => {
                tracing::debug!(target: TRACE_TARGET, "{diagnostic}");
            }
        }
    }
}

/// Stores every reported diagnostic in order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.collected
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Removes and returns everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.collected
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.collected.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut guard) = self.collected.lock() {
            guard.push(diagnostic);
        }
    }
}
