#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` interprets POSIX file ACLs in the text form printed by `getfacl`.
//! It parses a record into typed entries, decides which entry governs a
//! given principal, matches requested permissions against it, and walks a
//! path up to the filesystem root to explain whether access is granted at
//! every level.
//!
//! # Design
//!
//! - [`FaclRecord::parse`] turns one text record into metadata plus entries
//!   in file order. It never fails.
//! - [`matches`] compares two [`PermissionTriple`]s under a [`MatchMode`].
//! - [`resolve`] picks the governing access entry for a [`Principal`] using
//!   POSIX class precedence; [`decide`] adds the permission match.
//! - [`Tracer`] fetches records through an [`AclSource`], looks up group
//!   membership through [`GroupMembership`], and moves between directories
//!   through [`PathOps`]. It produces a [`Trace`] (root first) or a
//!   [`Navigation`] (execute on every parent plus the requested permissions
//!   on the object).
//!
//! The crate performs no I/O of its own beyond what the supplied
//! collaborators do. [`GetfaclSource`], [`SystemGroups`] and [`SystemPaths`]
//! talk to the host; [`DumpSource`] and [`StaticGroups`] serve fixed data.
//!
//! # Invariants
//!
//! - Default (`d:`) entries are parsed and kept but never decide access.
//! - A trace always ends at the root or at the first level without an
//!   applicable entry; that level is recorded with `permitted == false`.
//! - `matches(h, w, AtLeast) == matches(w, h, AtMost)` for every pair.
//!
//! # Errors
//!
//! Only direct caller misuse is an error: an unknown mode string, a
//! malformed entry passed as a query, or a start path that looks like an
//! entry ([`AclError`]). Malformed record lines, missing headers, failing
//! sources and failed group lookups are reported through [`Diagnostics`] and
//! degrade to empty data, so a walk always completes.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//!
//! use acl::{AccessQuery, CollectingDiagnostics, DumpSource, MatchMode, StaticGroups, SystemPaths, Tracer};
//!
//! let source = DumpSource::new()
//!     .with_record("/", "# file: /\n# owner: root\n# group: root\nuser::rwx\ngroup::r-x\nother::r-x\n")
//!     .with_record("/srv", "# file: srv\n# owner: root\n# group: root\nuser::rwx\ngroup::r-x\nother::---\n");
//! let groups = StaticGroups::new().with_user("alice", ["staff"]);
//! let diagnostics = CollectingDiagnostics::new();
//! let tracer = Tracer::new(&source, &groups, &SystemPaths).with_diagnostics(&diagnostics);
//!
//! let query = AccessQuery::parse("user:alice:r--", MatchMode::AtLeast)?;
//! let trace = tracer.trace(Path::new("/srv"), &query)?;
//!
//! assert_eq!(trace.len(), 2);
//! assert!(!trace.is_permitted());
//! assert_eq!(trace.first_denied().map(|level| level.path.as_path()), Some(Path::new("/srv")));
//! # Ok::<(), acl::AclError>(())
//! ```

pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod matcher;
pub mod perms;
pub mod query;
pub mod record;
pub mod resolve;
pub mod source;
pub mod trace;

pub use diagnostics::{CollectingDiagnostics, Diagnostic, Diagnostics, MetadataField, TracingDiagnostics};
pub use entry::{AclEntry, PrincipalType, parse_entry_line};
pub use error::{AclError, AclResult, EntryDefect, SourceError};
pub use matcher::{MatchMode, matches};
pub use perms::PermissionTriple;
pub use query::AccessQuery;
pub use record::{FaclRecord, RecordMetadata};
pub use resolve::{Decision, Principal, decide, resolve};
pub use source::{
    AclSource, DumpSource, GETFACL_ENV, GetfaclSource, GroupMembership, PathOps, StaticGroups,
    SystemGroups, SystemPaths,
};
pub use trace::{Navigation, Trace, TraceEntry, Tracer, ensure_path_operand};
