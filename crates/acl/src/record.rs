//! crates/acl/src/record.rs
//!
//! Parsing of a complete `getfacl` text record.
//!
//! ```text
//! # file: srv/data
//! # owner: alice
//! # group: staff
//! # flags: -s-
//! user::rwx
//! group::r-x
//! other::--x
//! default:user::rwx
//! ```
//!
//! Header lines are matched against a fixed prefix table before any entry is
//! parsed, so owner/group entries with empty names always see the record
//! metadata. Parsing never fails: malformed entry lines are dropped and
//! reported, absent headers default to empty strings.

use crate::diagnostics::{Diagnostic, Diagnostics, MetadataField};
use crate::entry::{AclEntry, parse_entry_line};

/// Header prefix table in the order fields are resolved.
const METADATA_HEADERS: [MetadataField; 4] = [
    MetadataField::Path,
    MetadataField::Owner,
    MetadataField::Group,
    MetadataField::Flags,
];

/// Metadata carried in the `# ...` header lines of a record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordMetadata {
    /// Value of `# file: `.
    pub path: String,
    /// Value of `# owner: `.
    pub owner: String,
    /// Value of `# group: `.
    pub group: String,
    /// Value of `# flags: `, when present.
    pub flags: Option<String>,
}

impl RecordMetadata {
    fn set(&mut self, field: MetadataField, value: &str) {
        let value = value.trim().to_owned();
        match field {
            MetadataField::Path => self.path = value,
            MetadataField::Owner => self.owner = value,
            MetadataField::Group => self.group = value,
            MetadataField::Flags => self.flags = Some(value),
        }
    }

    /// Reads the header lines of `text`; the last occurrence of a header wins.
    pub fn parse(text: &str, diagnostics: &dyn Diagnostics) -> Self {
        let mut metadata = Self::default();
        for field in METADATA_HEADERS {
            let prefix = field.prefix();
            let value = text
                .lines()
                .filter_map(|line| line.strip_prefix(prefix))
                .last();
            match value {
                Some(value) => metadata.set(field, value),
                None if field == MetadataField::Flags => {}
                None => diagnostics.report(Diagnostic::MissingMetadata { field }),
            }
        }
        metadata
    }
}

/// A parsed ACL record: metadata plus entries in file order.
///
/// Access entries describe current access to the object; default entries
/// describe what newly created children inherit and never take part in an
/// access decision on the object itself.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FaclRecord {
    metadata: RecordMetadata,
    entries: Vec<AclEntry>,
}

impl FaclRecord {
    /// A record without metadata or entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a record from `getfacl` text.
    pub fn parse(text: &str, diagnostics: &dyn Diagnostics) -> Self {
        let metadata = RecordMetadata::parse(text, diagnostics);
        let mut entries = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_entry_line(line, Some(&metadata), diagnostics) {
                Ok(entry) => entries.push(entry),
                Err(reason) => diagnostics.report(Diagnostic::MalformedEntryLine {
                    line: line.to_owned(),
                    reason,
                }),
            }
        }

        logging::trace_parse!(
            path = %metadata.path,
            entries = entries.len(),
            "parsed record"
        );
        Self { metadata, entries }
    }

    /// Header metadata.
    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    /// Value of `# file: `.
    pub fn path(&self) -> &str {
        &self.metadata.path
    }

    /// Owning user.
    pub fn owner(&self) -> &str {
        &self.metadata.owner
    }

    /// Owning group.
    pub fn group(&self) -> &str {
        &self.metadata.group
    }

    /// Flags header, when present.
    pub fn flags(&self) -> Option<&str> {
        self.metadata.flags.as_deref()
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[AclEntry] {
        &self.entries
    }

    /// Entries governing current access, in file order.
    pub fn access_entries(&self) -> impl Iterator<Item = &AclEntry> {
        self.entries.iter().filter(|entry| entry.is_access())
    }

    /// Inherited (default) entries, in file order.
    pub fn default_entries(&self) -> impl Iterator<Item = &AclEntry> {
        self.entries.iter().filter(|entry| entry.is_default)
    }

    /// Returns `true` when the record holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
