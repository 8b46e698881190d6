use assert_cmd::Command;
use predicates::prelude::*;
use test_support::{dump_file, hierarchy_dump};

fn facl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_facl"))
}

#[test]
fn facl_help_lists_usage() {
    facl()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage:").and(predicate::str::contains("facl")));
}

#[test]
fn facl_without_operands_shows_usage() {
    facl()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn facl_version_matches_the_package() {
    facl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn trace_reads_a_saved_dump() {
    let dump = dump_file(&hierarchy_dump()).expect("write dump");

    facl()
        .args(["--color", "never", "--groups", "root=root", "--from-dump"])
        .arg(dump.path())
        .args(["trace", "/home/user1/project", "user:root:rwx"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0) ✅ user::rwx /\n"))
        .stdout(predicate::str::contains(
            "Permission 'at_least' for ACL 'user:root:rwx' is NOT granted on path '/home/user1/project'.",
        ));
}

#[test]
fn has_reports_navigation_and_permission() {
    let dump = dump_file(&hierarchy_dump()).expect("write dump");

    facl()
        .args(["--color", "never", "--groups", "user1=group1", "--from-dump"])
        .arg(dump.path())
        .args(["has", "/home/user1/project", "group:group2:rwx", "-m", "at_most"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User/group can navigate to '/home/user1/project'\nUser/group has 'at_most' permission for ACL 'group:group2:rwx'.",
        ));
}

#[test]
fn invalid_mode_exits_with_usage_status() {
    facl()
        .args(["trace", "/srv", "other::r--", "--mode", "sometimes"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("facl: invalid mode 'sometimes'"));
}

#[test]
fn missing_dump_exits_with_failure_status() {
    let dir = tempfile::tempdir().expect("tempdir");

    facl()
        .arg("--from-dump")
        .arg(dir.path().join("absent.facl"))
        .args(["show", "/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read ACL dump"));
}
