//! crates/acl/src/source/groups.rs
//!
//! Group membership providers.

use std::collections::HashMap;

use super::GroupMembership;
use crate::error::SourceError;

/// Group membership from the system user database.
///
/// The result includes the user's primary group, matching `id -Gn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemGroups;

#[cfg(unix)]
impl GroupMembership for SystemGroups {
    fn groups_of(&self, user: &str) -> Result<Vec<String>, SourceError> {
        let account = uzers::get_user_by_name(user)
            .ok_or_else(|| SourceError::UnknownUser(user.to_owned()))?;
        group_names(user, uzers::get_user_groups(user, account.primary_group_id()))
    }
}

#[cfg(unix)]
fn group_names(
    user: &str,
    groups: Option<Vec<uzers::Group>>,
) -> Result<Vec<String>, SourceError> {
    let groups = groups.ok_or_else(|| SourceError::GroupListUnavailable(user.to_owned()))?;
    Ok(groups
        .iter()
        .map(|group| group.name().to_string_lossy().into_owned())
        .collect())
}

#[cfg(not(unix))]
impl GroupMembership for SystemGroups {
    fn groups_of(&self, _user: &str) -> Result<Vec<String>, SourceError> {
        Err(SourceError::Unavailable {
            program: "user database".to_owned(),
        })
    }
}

/// Fixed user to groups mapping.
#[derive(Clone, Debug, Default)]
pub struct StaticGroups {
    members: HashMap<String, Vec<String>>,
}

impl StaticGroups {
    /// Creates an empty mapping in which every user is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the groups of `user`.
    pub fn with_user<I, S>(mut self, user: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members
            .insert(user.into(), groups.into_iter().map(Into::into).collect());
        self
    }
}

impl GroupMembership for StaticGroups {
    fn groups_of(&self, user: &str) -> Result<Vec<String>, SourceError> {
        self.members
            .get(user)
            .cloned()
            .ok_or_else(|| SourceError::UnknownUser(user.to_owned()))
    }
}
