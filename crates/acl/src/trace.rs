//! crates/acl/src/trace.rs
//!
//! Walking a path up to the filesystem root and folding per-level decisions.
//!
//! A [`Tracer`] fetches the record of every ancestor through an
//! [`AclSource`], decides the query at each level with
//! [`decide`](crate::resolve::decide), and stops either at the root or at the
//! first level where no entry applies. That terminal level is always part of
//! the result. The collected levels are returned root first as a [`Trace`];
//! the overall verdict is the AND of every level.
//!
//! [`Tracer::navigate`] combines a traversal check (execute on every parent
//! directory) with a single-level check on the object itself.

use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Diagnostics, TracingDiagnostics};
use crate::entry::AclEntry;
use crate::error::{AclError, AclResult};
use crate::query::AccessQuery;
use crate::record::FaclRecord;
use crate::resolve::decide;
use crate::source::{AclSource, GroupMembership, PathOps};

/// One level of a hierarchy walk.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceEntry {
    /// Position in the trace; 0 is the top-most ancestor.
    pub index: usize,
    /// Path examined at this level.
    pub path: PathBuf,
    /// The entry governing the query here, or `None` when none applies.
    pub entry: Option<AclEntry>,
    /// Whether this level satisfies the query.
    pub permitted: bool,
}

/// Result of a hierarchy walk, ordered from the top-most ancestor to the
/// start path.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    fn from_walk(mut walked: Vec<TraceEntry>) -> Self {
        walked.reverse();
        for (index, entry) in walked.iter_mut().enumerate() {
            entry.index = index;
        }
        Self { entries: walked }
    }

    /// `true` when every level permits the query.
    pub fn is_permitted(&self) -> bool {
        self.entries.iter().all(|entry| entry.permitted)
    }

    /// Levels in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    /// Levels as a slice.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the trace holds no levels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The level of the start path (the last one examined).
    pub fn leaf(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// The top-most level that denies the query.
    pub fn first_denied(&self) -> Option<&TraceEntry> {
        self.entries.iter().find(|entry| !entry.permitted)
    }
}

impl IntoIterator for Trace {
    type Item = TraceEntry;
    type IntoIter = std::vec::IntoIter<TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'t> IntoIterator for &'t Trace {
    type Item = &'t TraceEntry;
    type IntoIter = std::slice::Iter<'t, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of [`Tracer::navigate`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Navigation {
    /// Execute-only trace over the parent directory chain.
    pub traversal: Trace,
    /// The requested query checked on the object alone.
    pub leaf: TraceEntry,
}

impl Navigation {
    /// Whether every parent directory may be searched.
    pub fn can_navigate(&self) -> bool {
        self.traversal.is_permitted()
    }

    /// Whether the object itself grants the requested permissions.
    pub fn has_permission(&self) -> bool {
        self.leaf.permitted
    }

    /// `can_navigate() && has_permission()`.
    pub fn is_granted(&self) -> bool {
        self.can_navigate() && self.has_permission()
    }
}

/// Evaluates queries over a directory hierarchy.
pub struct Tracer<'a> {
    source: &'a dyn AclSource,
    groups: &'a dyn GroupMembership,
    paths: &'a dyn PathOps,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Tracer<'a> {
    /// Creates a tracer reporting diagnostics through `tracing`.
    pub fn new(
        source: &'a dyn AclSource,
        groups: &'a dyn GroupMembership,
        paths: &'a dyn PathOps,
    ) -> Self {
        Self {
            source,
            groups,
            paths,
            diagnostics: &TracingDiagnostics,
        }
    }

    /// Replaces the diagnostics receiver.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Fetches and parses the record of `path`.
    ///
    /// A source failure is reported and yields an empty record.
    pub fn record_for(&self, path: &Path) -> FaclRecord {
        match self.source.fetch(path) {
            Ok(text) => FaclRecord::parse(&text, self.diagnostics),
            Err(error) => {
                self.diagnostics.report(Diagnostic::UnavailableAclSource {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                });
                FaclRecord::empty()
            }
        }
    }

    /// Walks from `start` to the root, deciding `query` at every level.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::PathLooksLikeAcl`] when `start` has no `/` but
    /// contains `:`, which usually means the arguments were swapped.
    pub fn trace(&self, start: &Path, query: &AccessQuery) -> AclResult<Trace> {
        ensure_path_operand(start)?;
        let mut current = self.paths.to_absolute(start);
        let mut walked = Vec::new();

        loop {
            let level = self.check_leaf(&current, query);
            logging::trace_walk!(
                path = %current.display(),
                entry = level.entry.as_ref().map_or("NO_ACL", |entry| entry.raw_line.as_str()),
                permitted = level.permitted,
                "trace level"
            );

            let stop = level.entry.is_none();
            walked.push(level);
            if stop {
                self.diagnostics.report(Diagnostic::NoApplicableAcl {
                    path: current.clone(),
                });
                break;
            }

            let parent = self.paths.parent(&current);
            if parent == current {
                break;
            }
            current = parent;
        }

        Ok(Trace::from_walk(walked))
    }

    /// `true` when every level of the trace from `start` permits `query`.
    ///
    /// # Errors
    ///
    /// See [`Tracer::trace`].
    pub fn has_permission(&self, start: &Path, query: &AccessQuery) -> AclResult<bool> {
        Ok(self.trace(start, query)?.is_permitted())
    }

    /// Decides `query` against the record of `path` alone.
    pub fn check_leaf(&self, path: &Path, query: &AccessQuery) -> TraceEntry {
        let record = self.record_for(path);
        let decision = decide(&record, query, self.groups, self.diagnostics);
        TraceEntry {
            index: 0,
            path: path.to_path_buf(),
            entry: decision.entry.cloned(),
            permitted: decision.permitted,
        }
    }

    /// Checks that the principal can reach `leaf` and holds `query` on it.
    ///
    /// The parent chain is traced with [`AccessQuery::navigation`]; the
    /// object itself is checked with `query` only.
    ///
    /// # Errors
    ///
    /// See [`Tracer::trace`].
    pub fn navigate(&self, leaf: &Path, query: &AccessQuery) -> AclResult<Navigation> {
        ensure_path_operand(leaf)?;
        let leaf = self.paths.to_absolute(leaf);
        let parent = self.paths.parent(&leaf);

        let traversal = self.trace(&parent, &query.navigation())?;
        let leaf = self.check_leaf(&leaf, query);
        Ok(Navigation { traversal, leaf })
    }
}

/// Rejects a start path that looks like an ACL entry.
///
/// # Errors
///
/// Returns [`AclError::PathLooksLikeAcl`] when `path` has no `/` but
/// contains `:`.
pub fn ensure_path_operand(path: &Path) -> AclResult<()> {
    let text = path.to_string_lossy();
    if !text.contains('/') && text.contains(':') {
        return Err(AclError::PathLooksLikeAcl(text.into_owned()));
    }
    Ok(())
}
