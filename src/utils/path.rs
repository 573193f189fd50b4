//! Path helpers

use crate::utils::log::{log, LogLevel};
use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components lexically, without touching the filesystem.
pub fn absolute(path: impl AsRef<Path>) -> PathBuf {
    absolute_from(env::current_dir(), path.as_ref())
}

/// An unreadable current directory leaves relative paths relative
fn absolute_from(cwd: io::Result<PathBuf>, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    match cwd {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(e) => {
            log(
                LogLevel::Warn,
                &format!("Could not read current directory, {} stays relative: {}", path.display(), e),
            );
            normalize(path)
        }
    }
}

/// Lexically resolves `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Lossy string form used in flags and the persisted plan
pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
