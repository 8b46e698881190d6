//! crates/acl/src/source/getfacl.rs
//!
//! ACL records read by running the system `getfacl` program.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use super::AclSource;
use crate::error::SourceError;

/// Environment variable overriding the `getfacl` program.
pub const GETFACL_ENV: &str = "FACL_GETFACL";

const DEFAULT_PROGRAM: &str = "getfacl";

/// Runs `getfacl <path>` and returns its standard output.
#[derive(Clone, Debug)]
pub struct GetfaclSource {
    program: OsString,
}

impl GetfaclSource {
    /// Uses `$FACL_GETFACL` when set and non-empty, `getfacl` otherwise.
    pub fn new() -> Self {
        let program = env::var_os(GETFACL_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_PROGRAM));
        Self { program }
    }

    /// Uses an explicit program.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GetfaclSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AclSource for GetfaclSource {
    fn fetch(&self, path: &Path) -> Result<String, SourceError> {
        logging::trace_source!(
            "running {} {}",
            self.program.to_string_lossy(),
            path.display()
        );
        let output = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| {
                if error.kind() == io::ErrorKind::NotFound {
                    SourceError::Unavailable {
                        program: self.program.to_string_lossy().into_owned(),
                    }
                } else {
                    SourceError::Io(error)
                }
            })?;

        if !output.status.success() {
            return Err(SourceError::Failed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
