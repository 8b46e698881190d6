//! `facl trace` against the fixture hierarchy loaded from a dump file.

use predicates::prelude::*;
use tempfile::NamedTempFile;
use test_support::{dump_file, hierarchy_dump};

const PROJECT: &str = "/home/user1/project";

fn fixture_dump() -> NamedTempFile {
    dump_file(&hierarchy_dump()).expect("write dump")
}

fn facl_colored(dump: &NamedTempFile, color: &str, extra: &[&str]) -> (i32, String, String) {
    let mut args = vec![
        "facl".to_owned(),
        "--color".to_owned(),
        color.to_owned(),
        "--groups".to_owned(),
        "root=root".to_owned(),
        "--groups".to_owned(),
        "user1=group1".to_owned(),
        "--from-dump".to_owned(),
        dump.path().display().to_string(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = cli::run(args, &mut stdout, &mut stderr);
    (
        status,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

fn facl(dump: &NamedTempFile, extra: &[&str]) -> (i32, String, String) {
    facl_colored(dump, "never", extra)
}

// ============================================================================
// Text Output
// ============================================================================

#[test]
fn denied_user_trace_lists_every_level() {
    let dump = fixture_dump();
    let (status, stdout, stderr) = facl(&dump, &["trace", PROJECT, "user:root:rwx"]);

    assert_eq!(status, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "\
0) ✅ user::rwx /
1) ✅ user::rwx /home
2) ❌ user:root:r-x /home/user1
3) ❌ user:root:r-x /home/user1/project
Permission 'at_least' for ACL 'user:root:rwx' is NOT granted on path '/home/user1/project'.
"
    );
}

#[test]
fn granted_user_trace_reports_success() {
    let dump = fixture_dump();
    let (status, stdout, _) = facl(&dump, &["trace", PROJECT, "user:user1:r-x"]);

    assert_eq!(status, 0);
    assert!(predicate::str::contains("0) ✅ user:user1:rwx /\n").eval(&stdout));
    assert!(predicate::str::contains("3) ✅ user::rwx /home/user1/project\n").eval(&stdout));
    assert!(
        predicate::str::ends_with(
            "Permission 'at_least' for ACL 'user:user1:r-x' is granted on path '/home/user1/project'.\n"
        )
        .eval(&stdout)
    );
    assert!(predicate::str::contains("❌").not().eval(&stdout));
}

#[test]
fn group_trace_uses_other_above_the_project() {
    let dump = fixture_dump();
    let (_, stdout, _) = facl(&dump, &["trace", PROJECT, "group:group2:r-x"]);

    assert!(predicate::str::contains("0) ❌ other::--x /\n").eval(&stdout));
    assert!(predicate::str::contains("2) ❌ other::--x /home/user1\n").eval(&stdout));
    assert!(predicate::str::contains("3) ✅ group:group2:r-x /home/user1/project\n").eval(&stdout));
}

#[test]
fn mode_option_changes_the_comparison() {
    let dump = fixture_dump();
    let (_, stdout, _) = facl(&dump, &["trace", PROJECT, "other::rwx", "--mode", "at_most"]);

    assert!(predicate::str::contains("Permission 'at_most'").eval(&stdout));
    assert!(predicate::str::contains("is granted").eval(&stdout));
}

#[test]
fn unknown_path_prints_a_single_no_acl_level() {
    let dump = fixture_dump();
    let (status, stdout, _) = facl(&dump, &["trace", "/srv/missing", "other::--x"]);

    assert_eq!(status, 0);
    assert!(predicate::str::starts_with("0) ❌ NO_ACL /srv/missing\n").eval(&stdout));
    assert!(predicate::str::contains("is NOT granted").eval(&stdout));
}

#[test]
fn colour_always_wraps_each_level() {
    let dump = fixture_dump();
    let (_, stdout, _) = facl_colored(&dump, "always", &["trace", PROJECT, "user:root:rwx"]);

    assert!(predicate::str::contains("\x1b[92m0) ✅ user::rwx /\x1b[0m\n").eval(&stdout));
    assert!(predicate::str::contains("\x1b[91m3) ❌ user:root:r-x /home/user1/project\x1b[0m\n").eval(&stdout));
}

// ============================================================================
// JSON Output
// ============================================================================

#[test]
fn json_trace_carries_levels_and_verdict() {
    let dump = fixture_dump();
    let (status, stdout, _) = facl(&dump, &["--format", "json", "trace", PROJECT, "user:root:rwx"]);

    assert_eq!(status, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert_eq!(report["granted"], false);
    assert_eq!(report["path"], PROJECT);
    assert_eq!(report["query"]["principal"], "user");
    assert_eq!(report["query"]["name"], "root");
    assert_eq!(report["query"]["permissions"], "rwx");
    assert_eq!(report["query"]["mode"], "at_least");

    let levels = report["trace"].as_array().expect("trace array");
    assert_eq!(levels.len(), 4);
    assert_eq!(levels[0]["path"], "/");
    assert_eq!(levels[0]["permitted"], true);
    assert_eq!(levels[2]["entry"]["raw_line"], "user:root:r-x");
    assert_eq!(levels[3]["index"], 3);
}

#[test]
fn json_level_without_entry_is_null() {
    let dump = fixture_dump();
    let (_, stdout, _) = facl(&dump, &["--format", "json", "trace", "/srv", "other::r--"]);

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert!(report["trace"][0]["entry"].is_null());
    assert!(!stdout.contains('\x1b'));
}
