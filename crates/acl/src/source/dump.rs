//! crates/acl/src/source/dump.rs
//!
//! ACL records held in memory, optionally loaded from a `getfacl -R` dump.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::AclSource;
use crate::diagnostics::{Diagnostic, Diagnostics, MetadataField};
use crate::error::SourceError;

/// Map from absolute path to record text.
#[derive(Clone, Debug, Default)]
pub struct DumpSource {
    records: HashMap<PathBuf, String>,
}

impl DumpSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the record for `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.records.insert(path.into(), text.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_record(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Splits concatenated `getfacl` output into records.
    ///
    /// Records are separated by blank lines and keyed by their `# file: `
    /// header. `getfacl` strips the leading `/` from absolute names, so
    /// relative header paths are anchored at the root. Blocks without a file
    /// header are skipped and reported as
    /// [`Diagnostic::HeaderlessDumpBlock`].
    pub fn from_dump(text: &str, diagnostics: &dyn Diagnostics) -> Self {
        let mut source = Self::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines().chain(std::iter::once("")) {
            if !line.trim().is_empty() {
                block.push(line);
                continue;
            }
            if block.is_empty() {
                continue;
            }
            match header_path(&block) {
                Some(path) => {
                    let mut record = block.join("\n");
                    record.push('\n');
                    source.insert(path, record);
                }
                None => diagnostics.report(Diagnostic::HeaderlessDumpBlock {
                    first_line: block[0].to_owned(),
                }),
            }
            block.clear();
        }
        source
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` when a record exists for `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }
}

fn header_path(block: &[&str]) -> Option<PathBuf> {
    let value = block
        .iter()
        .filter_map(|line| line.strip_prefix(MetadataField::Path.prefix()))
        .last()?
        .trim();
    if value.is_empty() {
        return None;
    }
    let anchored = if value.starts_with('/') {
        PathBuf::from(value)
    } else {
        Path::new("/").join(value.trim_start_matches("./"))
    };
    Some(anchored)
}

impl<P, T> FromIterator<(P, T)> for DumpSource
where
    P: Into<PathBuf>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut source = Self::new();
        for (path, text) in iter {
            source.insert(path, text);
        }
        source
    }
}

impl AclSource for DumpSource {
    fn fetch(&self, path: &Path) -> Result<String, SourceError> {
        self.records
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::Unavailable {
                program: format!("ACL record for {}", path.display()),
            })
    }
}
