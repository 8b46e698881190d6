//! Shared fixtures for the facl workspace tests.
//!
//! Records are produced in `getfacl` text form so every crate exercises the
//! same parser path. The four-level hierarchy returned by [`hierarchy`] is:
//!
//! | path                  | owner | group  | extra entries                      |
//! |-----------------------|-------|--------|------------------------------------|
//! | `/`                   | root  | group1 | `user:user1:rwx`                   |
//! | `/home`               | root  | group1 | `user:user1:rwx`                   |
//! | `/home/user1`         | user1 | group1 | `user:root:r-x`                    |
//! | `/home/user1/project` | user1 | group1 | `user:root:r-x`, `group:group2:r-x`|
//!
//! Every record also carries `user::rwx`, `group::r-x` and `other::--x`.

use std::io::{self, Write};

use tempfile::NamedTempFile;

/// Paths of the fixture hierarchy, root first.
pub const HIERARCHY_PATHS: [&str; 4] = ["/", "/home", "/home/user1", "/home/user1/project"];

/// Renders a record with the standard owner, group and other entries
/// followed by `extra`.
pub fn facl_text(path: &str, owner: &str, group: &str, extra: &[&str]) -> String {
    let mut text = format!(
        "# file: {path}\n# owner: {owner}\n# group: {group}\n# flags: -s-\nuser::rwx\ngroup::r-x\nother::--x\n"
    );
    for line in extra {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// A single record with access and default entries.
pub fn single_record_text() -> String {
    "\
# file: testfile
# owner: user1
# group: group1
# flags: -s-
user::rwx
group::r-x
other::r-x
d:user::rwx
d:g::r-x
o::r-x
"
    .to_owned()
}

/// The four-level hierarchy as `(path, record)` pairs, root first.
pub fn hierarchy() -> Vec<(&'static str, String)> {
    let extras: [&[&str]; 4] = [
        &["user:user1:rwx"],
        &["user:user1:rwx"],
        &["user:root:r-x"],
        &["user:root:r-x", "group:group2:r-x"],
    ];
    let owners = ["root", "root", "user1", "user1"];

    HIERARCHY_PATHS
        .iter()
        .zip(owners)
        .zip(extras)
        .map(|((path, owner), extra)| (*path, facl_text(path, owner, "group1", extra)))
        .collect()
}

/// The hierarchy as one `getfacl -R`-style dump, records separated by blank
/// lines.
pub fn hierarchy_dump() -> String {
    hierarchy()
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `contents` to a temporary file that lives as long as the handle.
pub fn dump_file(contents: &str) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
