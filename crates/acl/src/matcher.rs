//! crates/acl/src/matcher.rs
//!
//! Three-mode comparison between granted and requested permissions.

use std::fmt;
use std::str::FromStr;

use crate::error::AclError;
use crate::perms::PermissionTriple;

/// Comparison semantics between an entry's permissions and a request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchMode {
    /// The granted field equals the requested field symbol for symbol.
    Exact,
    /// The granted bits include every requested bit.
    #[default]
    AtLeast,
    /// The granted bits are all within the requested bits.
    AtMost,
}

impl MatchMode {
    /// The canonical spelling of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::AtLeast => "at_least",
            Self::AtMost => "at_most",
        }
    }
}

impl FromStr for MatchMode {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "at_least" | "at-least" => Ok(Self::AtLeast),
            "at_most" | "at-most" => Ok(Self::AtMost),
            other => Err(AclError::InvalidMode(other.to_owned())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares the permissions an entry grants (`have`) with a request (`want`).
///
/// - [`MatchMode::Exact`]: identical symbols, `-` placeholders included.
/// - [`MatchMode::AtLeast`]: every bit requested by `want` is present in
///   `have`; `-` in `want` means "don't care".
/// - [`MatchMode::AtMost`]: every bit present in `have` is allowed by `want`.
///
/// `matches(h, w, AtLeast) == matches(w, h, AtMost)` for all fields.
pub fn matches(have: PermissionTriple, want: PermissionTriple, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => have == want,
        MatchMode::AtLeast => want.is_subset_of(have),
        MatchMode::AtMost => have.is_subset_of(want),
    }
}
