//! crates/acl/src/perms.rs
//!
//! The three-symbol permission field of an ACL entry.

use std::fmt;
use std::str::FromStr;

use crate::error::EntryDefect;

/// Read permission bit.
pub const READ: u8 = 0b100;
/// Write permission bit.
pub const WRITE: u8 = 0b010;
/// Execute (directory search) permission bit.
pub const EXECUTE: u8 = 0b001;

/// Exactly three symbols out of `r`, `w`, `x` and `-`.
///
/// The symbols are kept verbatim so [`Display`](fmt::Display) reproduces the
/// record text and exact matching stays position-for-position. For containment
/// checks the field is reduced to a 3-bit set derived from which letters appear;
/// `-` never contributes a bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PermissionTriple {
    symbols: [u8; 3],
}

impl PermissionTriple {
    /// `---`
    pub const NONE: Self = Self { symbols: *b"---" };
    /// `--x`, the permission required to traverse a directory.
    pub const EXECUTE_ONLY: Self = Self { symbols: *b"--x" };
    /// `rwx`
    pub const ALL: Self = Self { symbols: *b"rwx" };

    /// Parses a permission field.
    pub fn parse(text: &str) -> Result<Self, EntryDefect> {
        let bytes = text.as_bytes();
        let symbols: [u8; 3] = bytes
            .try_into()
            .map_err(|_| EntryDefect::Permissions(text.to_owned()))?;
        if !symbols.iter().all(|b| matches!(b, b'r' | b'w' | b'x' | b'-')) {
            return Err(EntryDefect::Permissions(text.to_owned()));
        }
        Ok(Self { symbols })
    }

    /// Builds the canonical `rwx`-positioned field for a bit set.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            symbols: [
                if bits & READ != 0 { b'r' } else { b'-' },
                if bits & WRITE != 0 { b'w' } else { b'-' },
                if bits & EXECUTE != 0 { b'x' } else { b'-' },
            ],
        }
    }

    /// The permission bits present in this field.
    pub fn bits(self) -> u8 {
        self.symbols.iter().fold(0, |acc, symbol| {
            acc | match symbol {
                b'r' => READ,
                b'w' => WRITE,
                b'x' => EXECUTE,
                _ => 0,
            }
        })
    }

    /// Returns `true` when every bit of `bits` is present.
    pub fn contains(self, bits: u8) -> bool {
        self.bits() & bits == bits
    }

    /// Returns `true` when every bit present here is also present in `other`.
    pub fn is_subset_of(self, other: Self) -> bool {
        other.contains(self.bits())
    }

    /// Returns `true` for read access.
    pub fn can_read(self) -> bool {
        self.contains(READ)
    }

    /// Returns `true` for write access.
    pub fn can_write(self) -> bool {
        self.contains(WRITE)
    }

    /// Returns `true` for execute/search access.
    pub fn can_execute(self) -> bool {
        self.contains(EXECUTE)
    }
}

impl Default for PermissionTriple {
    fn default() -> Self {
        Self::NONE
    }
}

impl FromStr for PermissionTriple {
    type Err = EntryDefect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PermissionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols {
            write!(f, "{}", char::from(symbol))?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PermissionTriple {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
