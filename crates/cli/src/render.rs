//! Text and JSON rendering of traces, navigation checks and records.

use std::io::{self, Write};
use std::path::Path;

use acl::{AccessQuery, FaclRecord, Navigation, Trace, TraceEntry};
use serde::Serialize;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Placeholder printed for a level without an applicable entry.
pub(crate) const NO_ACL: &str = "NO_ACL";

/// Formats one level as `<index>) <mark> <entry> <path>`.
pub(crate) fn trace_line(level: &TraceEntry, color: bool) -> String {
    let mark = if level.permitted { "✅" } else { "❌" };
    let entry = level
        .entry
        .as_ref()
        .map_or(NO_ACL, |entry| entry.raw_line.as_str());
    let line = format!("{}) {mark} {entry} {}", level.index, level.path.display());

    if color {
        let start = if level.permitted { GREEN } else { RED };
        format!("{start}{line}{RESET}")
    } else {
        line
    }
}

pub(crate) fn write_levels<'t, W, I>(out: &mut W, levels: I, color: bool) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'t TraceEntry>,
{
    for level in levels {
        writeln!(out, "{}", trace_line(level, color))?;
    }
    Ok(())
}

pub(crate) fn trace_verdict(query: &AccessQuery, acl: &str, path: &Path, granted: bool) -> String {
    let outcome = if granted { "is granted" } else { "is NOT granted" };
    format!(
        "Permission '{}' for ACL '{acl}' {outcome} on path '{}'.",
        query.mode,
        path.display()
    )
}

pub(crate) fn navigation_verdict(
    query: &AccessQuery,
    acl: &str,
    path: &Path,
    navigation: &Navigation,
) -> String {
    let reach = if navigation.can_navigate() {
        "can"
    } else {
        "cannot"
    };
    let holds = if navigation.has_permission() {
        "has"
    } else {
        "does NOT have"
    };
    format!(
        "User/group {reach} navigate to '{}'\nUser/group {holds} '{}' permission for ACL '{acl}'.",
        path.display(),
        query.mode
    )
}

/// Leaf check numbered after the traversal levels.
pub(crate) fn numbered_leaf(navigation: &Navigation) -> TraceEntry {
    TraceEntry {
        index: navigation.traversal.len(),
        ..navigation.leaf.clone()
    }
}

pub(crate) fn write_record<W: Write>(out: &mut W, record: &FaclRecord) -> io::Result<()> {
    writeln!(out, "path:  {}", record.path())?;
    writeln!(out, "owner: {}", record.owner())?;
    writeln!(out, "group: {}", record.group())?;
    if let Some(flags) = record.flags() {
        writeln!(out, "flags: {flags}")?;
    }

    writeln!(out, "access:")?;
    for entry in record.access_entries() {
        writeln!(
            out,
            "  {:<6} {:<12} {}",
            entry.principal.as_str(),
            entry.name,
            entry.permissions
        )?;
    }

    let mut defaults = record.default_entries().peekable();
    if defaults.peek().is_some() {
        writeln!(out, "default:")?;
        for entry in defaults {
            writeln!(
                out,
                "  {:<6} {:<12} {}",
                entry.principal.as_str(),
                entry.name,
                entry.permissions
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
pub(crate) struct TraceReport<'a> {
    pub path: &'a Path,
    pub query: &'a AccessQuery,
    pub granted: bool,
    pub trace: &'a Trace,
}

#[derive(Serialize)]
pub(crate) struct HasReport<'a> {
    pub path: &'a Path,
    pub query: &'a AccessQuery,
    pub can_navigate: bool,
    pub has_permission: bool,
    pub granted: bool,
    pub traversal: &'a Trace,
    pub leaf: &'a TraceEntry,
}

#[derive(Serialize)]
pub(crate) struct ShowReport<'a> {
    pub path: &'a Path,
    pub record: &'a FaclRecord,
}

pub(crate) fn write_json<W: Write, T: Serialize>(out: &mut W, report: &T) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)
}
