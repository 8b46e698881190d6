//! crates/acl/src/query.rs
//!
//! The question asked of a record: does this principal hold these permissions?

use std::fmt;

use crate::entry::{AclEntry, PrincipalType};
use crate::error::{AclError, AclResult, EntryDefect};
use crate::matcher::MatchMode;
use crate::perms::PermissionTriple;

/// A principal together with the permissions requested for it.
///
/// An empty `name` on a user or group query refers to the owning user or
/// group of whichever record the query is evaluated against.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccessQuery {
    /// Principal class being checked.
    pub principal: PrincipalType,
    /// Principal name.
    pub name: String,
    /// Requested permissions.
    pub permissions: PermissionTriple,
    /// Comparison semantics.
    pub mode: MatchMode,
}

impl AccessQuery {
    /// Creates a query from its parts.
    pub fn new(
        principal: PrincipalType,
        name: impl Into<String>,
        permissions: PermissionTriple,
        mode: MatchMode,
    ) -> Self {
        Self {
            principal,
            name: name.into(),
            permissions,
            mode,
        }
    }

    /// Parses an entry string such as `user:alice:r-x` into a query.
    ///
    /// Default (`d:`) entries describe inheritance, not access, and are
    /// rejected.
    pub fn parse(entry: &str, mode: MatchMode) -> AclResult<Self> {
        let parsed: AclEntry = entry.parse()?;
        if parsed.is_default {
            return Err(AclError::MalformedEntry {
                line: entry.to_owned(),
                reason: EntryDefect::DefaultQuery,
            });
        }
        Ok(Self::new(
            parsed.principal,
            parsed.name,
            parsed.permissions,
            mode,
        ))
    }

    /// The query asking whether the same principal may traverse a directory.
    pub fn navigation(&self) -> Self {
        Self {
            principal: self.principal,
            name: self.name.clone(),
            permissions: PermissionTriple::EXECUTE_ONLY,
            mode: MatchMode::AtLeast,
        }
    }
}

impl fmt::Display for AccessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.principal, self.name, self.permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_user_query() {
        let query = AccessQuery::parse("user:user1:rwx", MatchMode::Exact).expect("valid");

        assert_eq!(query.principal, PrincipalType::User);
        assert_eq!(query.name, "user1");
        assert_eq!(query.permissions, PermissionTriple::ALL);
        assert_eq!(query.mode, MatchMode::Exact);
        assert_eq!(query.to_string(), "user:user1:rwx");
    }

    #[test]
    fn other_query_has_empty_name() {
        let query = AccessQuery::parse("o::r-x", MatchMode::AtMost).expect("valid");

        assert_eq!(query.principal, PrincipalType::Other);
        assert!(query.name.is_empty());
    }

    #[test]
    fn default_entries_are_not_queries() {
        let err = AccessQuery::parse("d:user:alice:rwx", MatchMode::AtLeast)
            .expect_err("default rejected");

        assert!(matches!(
            err,
            AclError::MalformedEntry {
                reason: EntryDefect::DefaultQuery,
                ..
            }
        ));
    }

    #[test]
    fn malformed_queries_fail_synchronously() {
        assert!(AccessQuery::parse("user:alice", MatchMode::AtLeast).is_err());
        assert!(AccessQuery::parse("/home/alice", MatchMode::AtLeast).is_err());
        assert!(AccessQuery::parse("admin:alice:rwx", MatchMode::AtLeast).is_err());
    }

    #[test]
    fn navigation_keeps_principal_and_requests_execute() {
        let query = AccessQuery::parse("group:devs:rw-", MatchMode::Exact).expect("valid");
        let nav = query.navigation();

        assert_eq!(nav.principal, PrincipalType::Group);
        assert_eq!(nav.name, "devs");
        assert_eq!(nav.permissions.to_string(), "--x");
        assert_eq!(nav.mode, MatchMode::AtLeast);
    }
}
