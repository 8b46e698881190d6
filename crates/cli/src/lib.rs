#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `facl` command-line front-end over the [`acl`]
//! crate. It offers three subcommands:
//!
//! - `facl trace PATH ACL [--mode MODE]` prints one line per level from the
//!   root down to `PATH` and whether every level grants the request;
//! - `facl has PATH ACL [--mode MODE]` checks search (`--x`) permission on
//!   every parent directory and the requested permission on `PATH` itself;
//! - `facl show PATH` prints the parsed record of `PATH`.
//!
//! # Design
//!
//! The crate exposes [`run`] as the entry point. It accepts the argument
//! vector together with handles for standard output and error, parses it
//! with a [`clap`](https://docs.rs/clap/) builder command, installs the
//! tracing subscriber for the requested verbosity, and drives an
//! [`acl::Tracer`] built from either live `getfacl` calls or a saved dump
//! (`--from-dump`). Group memberships come from the system user database
//! unless `--groups` supplies them.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - A denied request is an answer, not a failure: the exit status is 0
//!   whether or not access is granted.
//! - Queries are validated before any ACL source is consulted.
//!
//! # Errors
//!
//! Usage errors (unknown options, an invalid mode, a malformed ACL entry, a
//! path that looks like an ACL entry) exit with status 2. Runtime failures
//! such as an unreadable dump file exit with status 1. Diagnostics are
//! written to the standard error handle as `facl: <message>`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["facl", "trace", "/srv", "other::r--", "--mode", "sometimes"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 2);
//! assert!(String::from_utf8_lossy(&stderr).contains("invalid mode 'sometimes'"));
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use logging::VerbosityConfig;

mod arguments;
mod error;
mod execution;
mod render;

pub use error::{CliError, EXIT_FAILURE, EXIT_OK, EXIT_USAGE};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Helpers for integration tests.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::arguments::{
        Action, ColorChoice, OutputFormat, ParsedArgs, QueryArgs, parse_args,
    };
}

fn verbosity(parsed: &arguments::ParsedArgs) -> VerbosityConfig {
    if parsed.quiet {
        VerbosityConfig::quiet()
    } else {
        VerbosityConfig::from_verbose_level(parsed.verbosity)
    }
}

/// Runs `facl` with `arguments`, returning the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match arguments::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let rendered = error.render().to_string();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if stdout.write_all(rendered.as_bytes()).is_err() {
                        return EXIT_FAILURE;
                    }
                    EXIT_OK
                }
                _ => {
                    let _ = stderr.write_all(rendered.as_bytes());
                    EXIT_USAGE
                }
            };
        }
    };

    logging::init_tracing(verbosity(&parsed));

    match execution::execute(&parsed, stdout) {
        Ok(()) => EXIT_OK,
        Err(error) => {
            let _ = writeln!(stderr, "facl: {error}");
            let _ = stdout.flush();
            error.exit_code()
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
