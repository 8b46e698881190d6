//! crates/acl/src/source/paths.rs
//!
//! Lexical path handling for the hierarchy walk.

use std::env;
use std::path::{Component, Path, PathBuf};

use super::PathOps;

/// Absolutises against the current directory and folds `.`/`..` lexically.
///
/// Symbolic links are not resolved, so `/a/link/..` becomes `/a`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemPaths;

impl SystemPaths {
    fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
                Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(part) => normalized.push(part),
            }
        }
        normalized
    }
}

impl PathOps for SystemPaths {
    fn to_absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return Self::normalize(path);
        }
        match env::current_dir() {
            Ok(cwd) => Self::normalize(&cwd.join(path)),
            Err(_) => Self::normalize(path),
        }
    }

    fn parent(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => path.to_path_buf(),
        }
    }
}
