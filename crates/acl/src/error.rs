//! crates/acl/src/error.rs
//!
//! Error types surfaced to direct callers and by collaborators.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations that can fail because of caller misuse.
pub type AclResult<T> = Result<T, AclError>;

/// Errors returned synchronously to the caller.
///
/// Recoverable conditions met while reading records or walking a hierarchy
/// are not errors; they are reported through
/// [`Diagnostics`](crate::Diagnostics) and degrade to a best-effort result.
#[derive(Debug, Error)]
pub enum AclError {
    /// The match mode is not one of `exact`, `at_least` or `at_most`.
    #[error("invalid mode '{0}': choose from 'exact', 'at_least', 'at_most'")]
    InvalidMode(String),
    /// A single ACL entry passed directly by the caller is malformed.
    #[error("malformed ACL entry '{line}': {reason}")]
    MalformedEntry {
        /// The rejected entry text.
        line: String,
        /// Why the entry was rejected.
        reason: EntryDefect,
    },
    /// The start path of a trace looks like an ACL entry.
    #[error("path looks like an ACL entry, check the argument order: {0}")]
    PathLooksLikeAcl(String),
    /// Reading caller-supplied input failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
}

/// Reason an ACL entry line was rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EntryDefect {
    /// The line does not split into 3 or 4 colon-separated fields.
    #[error("expected 3 or 4 colon-separated fields, found {0}")]
    FieldCount(usize),
    /// A 4-field line whose leading field is not `d` or `default`.
    #[error("unexpected default prefix '{0}'")]
    DefaultPrefix(String),
    /// The principal type token is not in the alias table.
    #[error("unexpected ACL type '{0}'")]
    PrincipalType(String),
    /// The permission field is not 3 symbols out of `r`, `w`, `x`, `-`.
    #[error("invalid permissions '{0}'")]
    Permissions(String),
    /// A default entry was given where an access query is required.
    #[error("default entries cannot be used as a query")]
    DefaultQuery,
}

/// Failure reported by an ACL source or a group membership lookup.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The ACL provider is not installed or holds no record for the path.
    #[error("{program} is not available")]
    Unavailable {
        /// Program or source that could not be consulted.
        program: String,
    },
    /// The ACL provider ran but reported failure.
    #[error("reading ACL for {} failed ({status}): {stderr}", path.display())]
    Failed {
        /// Path whose ACL was requested.
        path: PathBuf,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The user is not known to the user database.
    #[error("unknown user '{0}'")]
    UnknownUser(String),
    /// The user exists but the user database could not list their groups.
    #[error("cannot list the groups of user '{0}'")]
    GroupListUnavailable(String),
    /// Spawning or reading from the provider failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn invalid_mode_names_the_accepted_modes() {
        let err = AclError::InvalidMode("sometimes".to_owned());
        let text = err.to_string();

        assert!(text.contains("sometimes"));
        assert!(text.contains("at_least"));
        assert!(text.contains("at_most"));
    }

    #[test]
    fn malformed_entry_includes_line_and_reason() {
        let err = AclError::MalformedEntry {
            line: "user:alice".to_owned(),
            reason: EntryDefect::FieldCount(2),
        };
        let text = err.to_string();

        assert!(text.contains("user:alice"));
        assert!(text.contains("found 2"));
    }

    #[test]
    fn io_error_converts_with_source() {
        use std::error::Error;

        let err: AclError = io::Error::new(ErrorKind::NotFound, "gone").into();

        assert!(matches!(err, AclError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn source_failure_mentions_path() {
        let err = SourceError::Failed {
            path: PathBuf::from("/srv/data"),
            status: "exit status: 1".to_owned(),
            stderr: "Operation not supported".to_owned(),
        };

        assert!(err.to_string().contains("/srv/data"));
        assert!(err.to_string().contains("Operation not supported"));
    }

    #[test]
    fn group_list_failure_names_the_user() {
        let err = SourceError::GroupListUnavailable("alice".to_owned());

        assert_eq!(err.to_string(), "cannot list the groups of user 'alice'");
    }
}
