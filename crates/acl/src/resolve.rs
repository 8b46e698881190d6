//! crates/acl/src/resolve.rs
//!
//! Selection of the single entry that governs a principal's access.
//!
//! Classes are consulted in POSIX precedence order, and within a class the
//! first access entry in file order wins:
//!
//! 1. user queries: a `user` entry whose name equals the queried name;
//! 2. user and group queries: a `group` entry naming one of the candidate
//!    groups (the user's groups from [`GroupMembership`], or the queried
//!    group itself);
//! 3. any query: the `other` entry.
//!
//! Default entries are never selected, and `mask` entries are not applied.
//!
//! Owning-user and named-user entries are not separated: the record's
//! `user::` line carries the owner's name after parsing, so when a record
//! also holds `user:<owner>:...` the line that comes first decides.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::entry::{AclEntry, PrincipalType};
use crate::matcher::matches;
use crate::query::AccessQuery;
use crate::record::FaclRecord;
use crate::source::GroupMembership;

/// Who is asking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Principal<'a> {
    /// Principal class.
    pub kind: PrincipalType,
    /// Principal name; empty means the record's owning user or group.
    pub name: &'a str,
}

impl<'a> Principal<'a> {
    /// Creates a principal.
    pub const fn new(kind: PrincipalType, name: &'a str) -> Self {
        Self { kind, name }
    }
}

/// Returns the entry of `record` governing `principal`, if any.
///
/// `None` is the normal outcome for a record without a matching entry (for
/// example an empty record); it is not an error. Group lookup failures are
/// reported to `diagnostics` and treated as membership in no group.
pub fn resolve<'r>(
    record: &'r FaclRecord,
    principal: Principal<'_>,
    groups: &dyn GroupMembership,
    diagnostics: &dyn Diagnostics,
) -> Option<&'r AclEntry> {
    let name = match (principal.kind, principal.name.is_empty()) {
        (PrincipalType::User, true) => record.owner(),
        (PrincipalType::Group, true) => record.group(),
        _ => principal.name,
    };

    let entry = match principal.kind {
        PrincipalType::User => named_user(record, name)
            .or_else(|| {
                let candidates = user_groups(name, groups, diagnostics);
                first_group(record, &candidates)
            })
            .or_else(|| other(record)),
        PrincipalType::Group => first_group(record, &[name.to_owned()]).or_else(|| other(record)),
        PrincipalType::Other => other(record),
        PrincipalType::Mask => None,
    };
    logging::trace_resolve!(
        principal = %principal.kind,
        name,
        entry = entry.map_or("NO_ACL", |entry| entry.raw_line.as_str()),
        "resolved"
    );
    entry
}

/// Result of evaluating a query against one record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decision<'r> {
    /// The governing entry, or `None` when no entry applies.
    pub entry: Option<&'r AclEntry>,
    /// Whether the governing entry satisfies the query; `false` without one.
    pub permitted: bool,
}

/// Resolves the governing entry for `query` and matches its permissions.
pub fn decide<'r>(
    record: &'r FaclRecord,
    query: &AccessQuery,
    groups: &dyn GroupMembership,
    diagnostics: &dyn Diagnostics,
) -> Decision<'r> {
    let principal = Principal::new(query.principal, &query.name);
    let entry = resolve(record, principal, groups, diagnostics);
    let permitted =
        entry.is_some_and(|entry| matches(entry.permissions, query.permissions, query.mode));
    Decision { entry, permitted }
}

fn named_user<'r>(record: &'r FaclRecord, name: &str) -> Option<&'r AclEntry> {
    record
        .access_entries()
        .find(|entry| entry.principal == PrincipalType::User && entry.name == name)
}

fn first_group<'r>(record: &'r FaclRecord, candidates: &[String]) -> Option<&'r AclEntry> {
    record.access_entries().find(|entry| {
        entry.principal == PrincipalType::Group
            && candidates.iter().any(|group| *group == entry.name)
    })
}

fn other(record: &FaclRecord) -> Option<&AclEntry> {
    record
        .access_entries()
        .find(|entry| entry.principal == PrincipalType::Other)
}

fn user_groups(
    user: &str,
    groups: &dyn GroupMembership,
    diagnostics: &dyn Diagnostics,
) -> Vec<String> {
    groups.groups_of(user).unwrap_or_else(|error| {
        diagnostics.report(Diagnostic::GroupLookupFailed {
            user: user.to_owned(),
            reason: error.to_string(),
        });
        Vec::new()
    })
}
