//! core::paths
//!
//! Repository path resolution.
//!
//! The repository location arrives as a raw string from a flag, an
//! environment variable, or a protocol argument. It is resolved exactly once,
//! when the module is constructed, and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use memex_git::core::paths::resolve_repo_path;
//! use std::path::Path;
//!
//! let resolved = resolve_repo_path("/srv/notes/../memex");
//! assert_eq!(resolved, Path::new("/srv/memex"));
//! ```

use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Resolve a raw repository path to an absolute path.
///
/// An empty string means the current directory. Relative paths are joined
/// onto the current directory and `.`/`..` components are folded lexically
/// (symlinks are not followed).
///
/// If the current directory cannot be determined the raw string is returned
/// unchanged.
pub fn resolve_repo_path(raw: &str) -> PathBuf {
    let raw_path = Path::new(raw);
    if raw_path.is_absolute() {
        return normalize(raw_path);
    }

    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(raw_path)),
        Err(e) => {
            debug!(raw, error = %e, "cannot determine current directory, using raw path");
            PathBuf::from(raw)
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let stacked = matches!(out.components().next_back(), Some(Component::ParentDir));
                if stacked || (!out.pop() && !path.has_root()) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Express `path` relative to `root`, if it lies inside it.
///
/// Both paths are normalized first. Returns `None` for paths outside `root`.
/// The root itself maps to an empty path.
pub fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = normalize(root);
    let path = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    };

    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}

/// Resolve symlinks in the longest prefix of `path` that exists.
///
/// The missing tail is appended as given, so paths to deleted files still
/// resolve. Falls back to the lexical form when no prefix can be resolved.
pub fn canonicalize_existing(path: &Path) -> PathBuf {
    let lexical = normalize(path);
    let mut tail = Vec::new();
    let mut current = lexical.as_path();

    loop {
        match std::fs::canonicalize(current) {
            Ok(real) => return tail.iter().rev().fold(real, |acc, part| acc.join(part)),
            Err(_) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    current = parent;
                }
                _ => return lexical,
            },
        }
    }
}
