//! crates/acl/src/entry.rs
//!
//! Principal classes and single ACL entry lines.
//!
//! An entry line has the form `[d:|default:]<type>:<name>:<perms>`. The type
//! token is looked up in a fixed alias table, an empty name stands for the
//! record's owning user or group, and `<perms>` is a [`PermissionTriple`].

use std::fmt;
use std::str::FromStr;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{AclError, EntryDefect};
use crate::perms::PermissionTriple;
use crate::record::RecordMetadata;

/// The class of principal an entry applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrincipalType {
    /// Owning user or a named user.
    User,
    /// Owning group or a named group.
    Group,
    /// Maximum permissions for named users and groups.
    Mask,
    /// Everyone not matched by another entry.
    Other,
}

/// Type tokens accepted in entry lines.
const PRINCIPAL_ALIASES: [(&str, PrincipalType); 8] = [
    ("u", PrincipalType::User),
    ("user", PrincipalType::User),
    ("g", PrincipalType::Group),
    ("group", PrincipalType::Group),
    ("m", PrincipalType::Mask),
    ("mask", PrincipalType::Mask),
    ("o", PrincipalType::Other),
    ("other", PrincipalType::Other),
];

/// Prefixes marking a default (inherited) entry.
const DEFAULT_PREFIXES: [&str; 2] = ["d", "default"];

impl PrincipalType {
    /// Looks up a type token in the alias table.
    pub fn from_token(token: &str) -> Option<Self> {
        PRINCIPAL_ALIASES
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, principal)| *principal)
    }

    /// The long spelling used by `getfacl`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Mask => "mask",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed ACL entry.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AclEntry {
    /// `true` for entries describing what new children inherit.
    pub is_default: bool,
    /// Principal class.
    pub principal: PrincipalType,
    /// Principal name; empty for `mask`, `other`, and for owner/group entries
    /// whose record metadata was unavailable.
    pub name: String,
    /// Granted permissions.
    pub permissions: PermissionTriple,
    /// The entry text as it appeared in the record, without the
    /// `#effective:` annotation `getfacl` appends to masked entries.
    pub raw_line: String,
}

impl AclEntry {
    /// Returns `true` for entries that govern current access.
    pub const fn is_access(&self) -> bool {
        !self.is_default
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_line)
    }
}

impl FromStr for AclEntry {
    type Err = AclError;

    /// Parses a standalone entry such as `user:alice:r-x`.
    ///
    /// Empty names are kept empty; no record metadata is consulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_entry(s).map_err(|reason| AclError::MalformedEntry {
            line: s.to_owned(),
            reason,
        })?;
        Ok(fields.into_entry(String::new()))
    }
}

/// Fields of an entry line before name resolution.
struct EntryFields<'a> {
    is_default: bool,
    principal: PrincipalType,
    name: &'a str,
    permissions: PermissionTriple,
    raw_line: &'a str,
}

impl EntryFields<'_> {
    fn into_entry(self, resolved_name: String) -> AclEntry {
        let name = if self.name.is_empty() {
            resolved_name
        } else {
            self.name.to_owned()
        };
        AclEntry {
            is_default: self.is_default,
            principal: self.principal,
            name,
            permissions: self.permissions,
            raw_line: self.raw_line.to_owned(),
        }
    }
}

const EFFECTIVE_MARKER: &str = "#effective:";

/// Removes the whitespace-separated `#effective:` suffix `getfacl` prints
/// after masked entries. Any other `#` is part of the entry text.
fn strip_effective_annotation(line: &str) -> &str {
    match line.rfind(EFFECTIVE_MARKER) {
        Some(index) if line[..index].ends_with(char::is_whitespace) => line[..index].trim_end(),
        _ => line,
    }
}

fn split_entry(line: &str) -> Result<EntryFields<'_>, EntryDefect> {
    let raw_line = strip_effective_annotation(line);
    let mut fields: Vec<&str> = raw_line.split(':').collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(EntryDefect::FieldCount(fields.len()));
    }

    let is_default = fields.len() == 4;
    if is_default {
        let prefix = fields.remove(0);
        if !DEFAULT_PREFIXES.contains(&prefix) {
            return Err(EntryDefect::DefaultPrefix(prefix.to_owned()));
        }
    }

    let principal = PrincipalType::from_token(fields[0])
        .ok_or_else(|| EntryDefect::PrincipalType(fields[0].to_owned()))?;
    let permissions = PermissionTriple::parse(fields[2])?;

    Ok(EntryFields {
        is_default,
        principal,
        name: fields[1],
        permissions,
        raw_line,
    })
}

/// Parses one entry line of a record.
///
/// An empty user name resolves to `metadata.owner` and an empty group name to
/// `metadata.group`. Without metadata the line is still accepted, the name
/// stays empty, and an [`Diagnostic::UninitializedRecord`] is reported.
pub fn parse_entry_line(
    line: &str,
    metadata: Option<&RecordMetadata>,
    diagnostics: &dyn Diagnostics,
) -> Result<AclEntry, EntryDefect> {
    let fields = split_entry(line)?;
    if !fields.name.is_empty() {
        return Ok(fields.into_entry(String::new()));
    }

    let resolved = match (fields.principal, metadata) {
        (PrincipalType::User, Some(meta)) => meta.owner.clone(),
        (PrincipalType::Group, Some(meta)) => meta.group.clone(),
        (PrincipalType::User | PrincipalType::Group, None) => {
            diagnostics.report(Diagnostic::UninitializedRecord {
                line: line.to_owned(),
            });
            String::new()
        }
        (PrincipalType::Mask | PrincipalType::Other, _) => String::new(),
    };
    Ok(fields.into_entry(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;

    fn metadata() -> RecordMetadata {
        RecordMetadata {
            path: "testfile".to_owned(),
            owner: "user1".to_owned(),
            group: "group1".to_owned(),
            flags: Some("-s-".to_owned()),
        }
    }

    fn parse(line: &str) -> Result<AclEntry, EntryDefect> {
        let meta = metadata();
        parse_entry_line(line, Some(&meta), &CollectingDiagnostics::new())
    }

    #[test]
    fn long_default_prefix_with_owner() {
        let entry = parse("default:user::rwx").expect("valid");

        assert!(entry.is_default);
        assert_eq!(entry.principal, PrincipalType::User);
        assert_eq!(entry.name, "user1");
        assert_eq!(entry.permissions.to_string(), "rwx");
        assert_eq!(entry.raw_line, "default:user::rwx");
    }

    #[test]
    fn short_default_prefix_with_named_user() {
        let entry = parse("d:u:krauset:rwx").expect("valid");

        assert!(entry.is_default);
        assert_eq!(entry.principal, PrincipalType::User);
        assert_eq!(entry.name, "krauset");
    }

    #[test]
    fn named_group_in_both_spellings() {
        for line in ["group:grp_hpc_collab002:r-x", "g:grp_hpc_collab002:r-x"] {
            let entry = parse(line).expect("valid");

            assert!(!entry.is_default);
            assert_eq!(entry.principal, PrincipalType::Group);
            assert_eq!(entry.name, "grp_hpc_collab002");
            assert_eq!(entry.permissions.to_string(), "r-x");
        }
    }

    #[test]
    fn owning_group_resolves_to_record_group() {
        let entry = parse("d:g::r-x").expect("valid");

        assert_eq!(entry.name, "group1");
    }

    #[test]
    fn other_and_mask_keep_empty_names() {
        assert_eq!(parse("other::r-x").expect("valid").name, "");
        assert_eq!(parse("o::r-x").expect("valid").principal, PrincipalType::Other);
        assert_eq!(parse("m::rwx").expect("valid").principal, PrincipalType::Mask);
    }

    #[test]
    fn field_count_outside_three_or_four_is_rejected() {
        assert_eq!(parse("user:rwx"), Err(EntryDefect::FieldCount(2)));
        assert_eq!(parse("d:user:a:b:rwx"), Err(EntryDefect::FieldCount(5)));
    }

    #[test]
    fn four_fields_require_default_prefix() {
        assert_eq!(
            parse("x:user::rwx"),
            Err(EntryDefect::DefaultPrefix("x".to_owned()))
        );
    }

    #[test]
    fn unknown_type_token_is_rejected() {
        assert_eq!(
            parse("owner::rwx"),
            Err(EntryDefect::PrincipalType("owner".to_owned()))
        );
    }

    #[test]
    fn bad_permissions_are_rejected() {
        assert_eq!(
            parse("user::rw"),
            Err(EntryDefect::Permissions("rw".to_owned()))
        );
        assert!(parse("user::rwt").is_err());
    }

    #[test]
    fn effective_comment_is_ignored() {
        let entry = parse("user:alice:rwx\t\t\t#effective:r-x").expect("valid");

        assert_eq!(entry.name, "alice");
        assert_eq!(entry.permissions.to_string(), "rwx");
        assert_eq!(entry.raw_line, "user:alice:rwx");
    }

    #[test]
    fn effective_marker_needs_leading_whitespace() {
        assert_eq!(
            parse("user:alice:rwx#effective:r-x"),
            Err(EntryDefect::DefaultPrefix("user".to_owned()))
        );
    }

    #[test]
    fn hash_inside_a_name_is_kept() {
        let entry = parse("user:a#b:rwx").expect("valid");

        assert_eq!(entry.name, "a#b");
        assert_eq!(entry.permissions.to_string(), "rwx");
        assert_eq!(entry.raw_line, "user:a#b:rwx");
    }

    #[test]
    fn trailing_text_after_permissions_is_rejected() {
        assert_eq!(
            parse("user::rwx "),
            Err(EntryDefect::Permissions("rwx ".to_owned()))
        );
        assert_eq!(
            parse("group::r-x #note"),
            Err(EntryDefect::Permissions("r-x #note".to_owned()))
        );
    }

    #[test]
    fn missing_metadata_warns_but_accepts() {
        let sink = CollectingDiagnostics::new();
        let entry = parse_entry_line("user::rwx", None, &sink).expect("accepted");

        assert_eq!(entry.name, "");
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UninitializedRecord {
                line: "user::rwx".to_owned()
            }]
        );
    }

    #[test]
    fn named_entries_need_no_metadata() {
        let sink = CollectingDiagnostics::new();
        parse_entry_line("user:alice:r--", None, &sink).expect("accepted");

        assert!(sink.is_empty());
    }

    #[test]
    fn standalone_parse_reports_caller_errors() {
        let entry: AclEntry = "user:alice:r-x".parse().expect("valid");
        assert_eq!(entry.name, "alice");

        let err = "user:alice".parse::<AclEntry>().expect_err("malformed");
        assert!(matches!(
            err,
            AclError::MalformedEntry {
                reason: EntryDefect::FieldCount(2),
                ..
            }
        ));
    }

    #[test]
    fn alias_table_covers_every_class() {
        assert_eq!(PrincipalType::from_token("u"), Some(PrincipalType::User));
        assert_eq!(PrincipalType::from_token("group"), Some(PrincipalType::Group));
        assert_eq!(PrincipalType::from_token("mask"), Some(PrincipalType::Mask));
        assert_eq!(PrincipalType::from_token("o"), Some(PrincipalType::Other));
        assert_eq!(PrincipalType::from_token("User"), None);
    }
}
