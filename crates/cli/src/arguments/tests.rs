//! Unit tests for command-line parsing.

use super::*;

fn parse_test_args<I, S>(args: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let iter = std::iter::once("facl".to_owned())
        .chain(args.into_iter().map(|s| s.as_ref().to_owned()));
    parse_args(iter)
}

// ============================================================================
// Subcommands
// ============================================================================

#[test]
fn trace_takes_path_acl_and_default_mode() {
    let parsed = parse_test_args(["trace", "/srv", "user:alice:r-x"]).expect("parse");

    assert_eq!(
        parsed.action,
        Action::Trace(QueryArgs {
            path: PathBuf::from("/srv"),
            acl: "user:alice:r-x".to_owned(),
            mode: "at_least".to_owned(),
        })
    );
}

#[test]
fn has_accepts_explicit_mode() {
    let parsed =
        parse_test_args(["has", "/srv/file", "group:devs:rw-", "--mode", "exact"]).expect("parse");

    match parsed.action {
        Action::Has(query) => assert_eq!(query.mode, "exact"),
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn mode_is_not_validated_while_parsing() {
    let parsed = parse_test_args(["trace", "/srv", "o::r--", "-m", "sometimes"]).expect("parse");

    match parsed.action {
        Action::Trace(query) => assert_eq!(query.mode, "sometimes"),
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn show_takes_a_single_path() {
    let parsed = parse_test_args(["show", "relative/dir"]).expect("parse");

    assert_eq!(
        parsed.action,
        Action::Show {
            path: PathBuf::from("relative/dir")
        }
    );
}

#[test]
fn missing_operands_are_rejected() {
    assert!(parse_test_args(["trace", "/srv"]).is_err());
    assert!(parse_test_args(["show"]).is_err());
    assert!(parse_test_args(Vec::<&str>::new()).is_err());
    assert!(parse_test_args(["frobnicate"]).is_err());
}

// ============================================================================
// Global options
// ============================================================================

#[test]
fn defaults_without_global_options() {
    let parsed = parse_test_args(["show", "/"]).expect("parse");

    assert_eq!(parsed.verbosity, 0);
    assert!(!parsed.quiet);
    assert_eq!(parsed.color, ColorChoice::Auto);
    assert_eq!(parsed.format, OutputFormat::Text);
    assert_eq!(parsed.from_dump, None);
    assert_eq!(parsed.getfacl, None);
    assert!(parsed.groups.is_empty());
}

#[test]
fn global_options_are_accepted_after_the_subcommand() {
    let parsed = parse_test_args([
        "trace",
        "/srv",
        "o::r--",
        "-vv",
        "--color",
        "never",
        "--format",
        "json",
        "--from-dump",
        "acls.txt",
        "--groups",
        "alice=staff,devs",
        "--groups",
        "bob=",
    ])
    .expect("parse");

    assert_eq!(parsed.verbosity, 2);
    assert_eq!(parsed.color, ColorChoice::Never);
    assert_eq!(parsed.format, OutputFormat::Json);
    assert_eq!(parsed.from_dump, Some(PathBuf::from("acls.txt")));
    assert_eq!(parsed.groups, vec!["alice=staff,devs", "bob="]);
}

#[test]
fn global_options_are_accepted_before_the_subcommand() {
    let parsed =
        parse_test_args(["--getfacl", "/opt/bin/getfacl", "-q", "show", "/"]).expect("parse");

    assert!(parsed.quiet);
    assert_eq!(parsed.getfacl, Some(OsString::from("/opt/bin/getfacl")));
}

#[test]
fn conflicting_options_are_rejected() {
    assert!(parse_test_args(["-v", "-q", "show", "/"]).is_err());
    assert!(
        parse_test_args(["--from-dump", "a", "--getfacl", "b", "show", "/"]).is_err()
    );
    assert!(parse_test_args(["--color", "sometimes", "show", "/"]).is_err());
    assert!(parse_test_args(["--format", "yaml", "show", "/"]).is_err());
}
