//! crates/acl/src/source.rs
//!
//! External collaborators consulted while answering a query.
//!
//! The core never reads the filesystem or the user database itself. It asks
//! an [`AclSource`] for the text record of a path, a [`GroupMembership`] for
//! the groups of a user, and a [`PathOps`] for absolute paths and parents.
//! Failures are returned as [`SourceError`] values; the tracer and resolver
//! turn them into diagnostics and degrade to empty data.

mod dump;
mod getfacl;
mod groups;
mod paths;

use std::path::{Path, PathBuf};

use crate::error::SourceError;

pub use dump::DumpSource;
pub use getfacl::{GETFACL_ENV, GetfaclSource};
pub use groups::{StaticGroups, SystemGroups};
pub use paths::SystemPaths;

/// Provides the raw ACL text record for a path.
pub trait AclSource {
    /// Returns the `getfacl`-format text for `path`.
    fn fetch(&self, path: &Path) -> Result<String, SourceError>;
}

/// Resolves the groups a user belongs to.
pub trait GroupMembership {
    /// Returns the names of every group `user` is a member of.
    fn groups_of(&self, user: &str) -> Result<Vec<String>, SourceError>;
}

/// Path manipulation used by the hierarchy walk.
pub trait PathOps {
    /// Returns an absolute form of `path`.
    fn to_absolute(&self, path: &Path) -> PathBuf;

    /// Returns the parent directory of `path`; the root is its own parent.
    fn parent(&self, path: &Path) -> PathBuf;
}

impl<T: AclSource + ?Sized> AclSource for &T {
    fn fetch(&self, path: &Path) -> Result<String, SourceError> {
        (**self).fetch(path)
    }
}

impl<T: GroupMembership + ?Sized> GroupMembership for &T {
    fn groups_of(&self, user: &str) -> Result<Vec<String>, SourceError> {
        (**self).groups_of(user)
    }
}
