//! Command-line definition and parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{OsStringValueParser, PathBufValueParser};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// When to colour trace lines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorChoice {
    /// Colour when standard output is a terminal.
    #[default]
    Auto,
    /// Always emit ANSI colour codes.
    Always,
    /// Never emit ANSI colour codes.
    Never,
}

/// Output rendering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

/// Operands shared by `trace` and `has`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryArgs {
    /// Object whose access is checked.
    pub path: PathBuf,
    /// ACL entry describing principal and permissions, e.g. `user:alice:r-x`.
    pub acl: String,
    /// Match mode name; validated when the query is built.
    pub mode: String,
}

/// Requested subcommand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Walk to the root and AND every level.
    Trace(QueryArgs),
    /// Check traversal of the parents and the permission on the object.
    Has(QueryArgs),
    /// Print the parsed record of one path.
    Show {
        /// Path whose record is printed.
        path: PathBuf,
    },
}

/// Parsed command-line arguments.
///
/// **Warning**: exposed via `cli::test_utils` for integration tests only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedArgs {
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `--quiet`.
    pub quiet: bool,
    /// `--color`.
    pub color: ColorChoice,
    /// `--format`.
    pub format: OutputFormat,
    /// `--from-dump FILE`: read records from saved `getfacl` output.
    pub from_dump: Option<PathBuf>,
    /// `--getfacl PROGRAM`: program used to read live records.
    pub getfacl: Option<OsString>,
    /// `--groups USER=GROUP[,GROUP...]`, in command-line order.
    pub groups: Vec<String>,
    /// Subcommand and its operands.
    pub action: Action,
}

pub(crate) const DEFAULT_MODE: &str = "at_least";

fn query_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("File or directory to check.")
                .required(true)
                .value_parser(PathBufValueParser::new()),
        )
        .arg(
            Arg::new("acl")
                .value_name("ACL")
                .help("ACL entry to check, e.g. 'user:alice:r-x'.")
                .required(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .value_name("MODE")
                .help("Comparison: 'exact', 'at_least' or 'at_most'.")
                .default_value(DEFAULT_MODE),
        )
}

pub(crate) fn clap_command() -> Command {
    Command::new("facl")
        .about("Explain POSIX ACL decisions along a directory hierarchy.")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable).")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors.")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Colour trace lines: auto, always or never.")
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text or json.")
                .value_parser(["text", "json"])
                .default_value("text")
                .global(true),
        )
        .arg(
            Arg::new("from-dump")
                .long("from-dump")
                .value_name("FILE")
                .help("Read ACL records from saved 'getfacl -R' output instead of running getfacl.")
                .value_parser(PathBufValueParser::new())
                .conflicts_with("getfacl")
                .global(true),
        )
        .arg(
            Arg::new("getfacl")
                .long("getfacl")
                .value_name("PROGRAM")
                .help("Program printing ACL records (default: $FACL_GETFACL or getfacl).")
                .value_parser(OsStringValueParser::new())
                .global(true),
        )
        .arg(
            Arg::new("groups")
                .long("groups")
                .value_name("USER=GROUP[,GROUP...]")
                .help("Use these group memberships instead of the system user database.")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(query_command(
            "trace",
            "Trace ACL permissions from PATH up to the filesystem root.",
        ))
        .subcommand(query_command(
            "has",
            "Check that PATH can be reached (--x on every parent) and grants ACL.",
        ))
        .subcommand(
            Command::new("show").about("Print the parsed ACL record of PATH.").arg(
                Arg::new("path")
                    .value_name("PATH")
                    .required(true)
                    .value_parser(PathBufValueParser::new()),
            ),
        )
}

fn query_args(matches: &mut ArgMatches) -> QueryArgs {
    QueryArgs {
        path: matches.remove_one::<PathBuf>("path").unwrap_or_default(),
        acl: matches.remove_one::<String>("acl").unwrap_or_default(),
        mode: matches
            .remove_one::<String>("mode")
            .unwrap_or_else(|| DEFAULT_MODE.to_owned()),
    }
}

/// Parses `arguments` (including the program name).
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("facl"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let verbosity = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");
    let color = match matches.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    };
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    let from_dump = matches.remove_one::<PathBuf>("from-dump");
    let getfacl = matches.remove_one::<OsString>("getfacl");
    let groups = matches
        .remove_many::<String>("groups")
        .map(|values| values.collect())
        .unwrap_or_default();

    let action = match matches.remove_subcommand() {
        Some((name, mut sub)) => match name.as_str() {
            "trace" => Action::Trace(query_args(&mut sub)),
            "has" => Action::Has(query_args(&mut sub)),
            _ => Action::Show {
                path: sub.remove_one::<PathBuf>("path").unwrap_or_default(),
            },
        },
        None => {
            return Err(clap_command().error(
                clap::error::ErrorKind::MissingSubcommand,
                "a subcommand is required",
            ));
        }
    };

    Ok(ParsedArgs {
        verbosity,
        quiet,
        color,
        format,
        from_dump,
        getfacl,
        groups,
        action,
    })
}

#[cfg(test)]
mod tests;
