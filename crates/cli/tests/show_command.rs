//! `facl show` prints the parsed record of a single path.

use predicates::prelude::*;
use test_support::{dump_file, hierarchy_dump};

fn facl_show(extra: &[&str]) -> (i32, String) {
    let dump = dump_file(&hierarchy_dump()).expect("write dump");
    let dump_path = dump.path().display().to_string();
    let mut args = vec!["facl", "--from-dump", dump_path.as_str()];
    args.extend_from_slice(extra);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = cli::run(args, &mut stdout, &mut stderr);
    (status, String::from_utf8(stdout).expect("utf-8 stdout"))
}

#[test]
fn record_lists_metadata_and_access_entries() {
    let (status, stdout) = facl_show(&["show", "/home/user1/project"]);

    assert_eq!(status, 0);
    assert!(predicate::str::starts_with(
        "path:  /home/user1/project\nowner: user1\ngroup: group1\nflags: -s-\naccess:\n"
    )
    .eval(&stdout));
    assert!(predicate::str::contains("  user   root         r-x\n").eval(&stdout));
    assert!(predicate::str::contains("  group  group2       r-x\n").eval(&stdout));
    assert!(predicate::str::contains("  other               --x\n").eval(&stdout));
    assert!(predicate::str::contains("default:").not().eval(&stdout));
}

#[test]
fn missing_record_prints_placeholder() {
    let (status, stdout) = facl_show(&["show", "/srv/nothing"]);

    assert_eq!(status, 0);
    assert_eq!(stdout, "NO_ACL /srv/nothing\n");
}

#[test]
fn json_record_exposes_entries() {
    let (status, stdout) = facl_show(&["--format", "json", "show", "/home"]);

    assert_eq!(status, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert_eq!(report["path"], "/home");
    assert_eq!(report["record"]["metadata"]["owner"], "root");
    let entries = report["record"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3]["raw_line"], "user:user1:rwx");
    assert_eq!(entries[3]["is_default"], false);
}
