//! Failures surfaced by the command-line front-end.

use std::io;
use std::path::PathBuf;

use acl::AclError;
use thiserror::Error;

/// Exit status when the query was answered, granted or not.
pub const EXIT_OK: i32 = 0;
/// Exit status for runtime failures such as an unreadable dump file.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for invalid invocations.
pub const EXIT_USAGE: i32 = 2;

/// Errors that stop a command before it produces an answer.
#[derive(Debug, Error)]
pub enum CliError {
    /// The query, mode or path was rejected by the ACL library.
    #[error(transparent)]
    Query(#[from] AclError),
    /// A `--groups` value is not `USER=GROUP[,GROUP...]`.
    #[error("invalid --groups value '{0}': expected USER=GROUP[,GROUP...]")]
    GroupSpec(String),
    /// The `--from-dump` file could not be read.
    #[error("cannot read ACL dump {}: {source}", path.display())]
    Dump {
        /// Dump file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Serialising the JSON report failed.
    #[error("cannot encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing to standard output failed.
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Query(AclError::Io(_)) => EXIT_FAILURE,
            Self::Query(_) | Self::GroupSpec(_) => EXIT_USAGE,
            Self::Dump { .. } | Self::Json(_) | Self::Output(_) => EXIT_FAILURE,
        }
    }
}
