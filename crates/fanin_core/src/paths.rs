use std::{
    env,
    path::{Path, PathBuf},
};

use log::trace;
use path_clean::clean;

use crate::error::Error;

/// Directory name under which third-party packages live. Paths containing
/// this segment never enter a file set or a graph.
const VENDORED_DIR: &str = "node_modules";

/// Rewrites a path to the forward-slash separator convention.
///
/// Every run of backslashes becomes a single forward slash. Case, drive
/// letters, and relative segments are preserved as-is. Idempotent.
pub fn to_forward_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_backslashes = false;
    for ch in path.chars() {
        if ch == '\\' {
            if !in_backslashes {
                out.push('/');
                in_backslashes = true;
            }
        } else {
            out.push(ch);
            in_backslashes = false;
        }
    }
    out
}

/// Strips a normalized base-directory prefix (and the separator following
/// it) from `path`, producing a project-relative path.
///
/// Both arguments are expected in forward-slash form. Paths not under
/// `context` are returned unchanged.
pub fn strip_context<'a>(path: &'a str, context: &str) -> &'a str {
    if context.is_empty() {
        return path;
    }
    let base = context.trim_end_matches('/');
    if let Some(rest) = path.strip_prefix(base) {
        if let Some(relative) = rest.strip_prefix('/') {
            return relative;
        }
        if rest.is_empty() {
            return rest;
        }
    }
    path
}

/// True when any segment of a forward-slash path equals the vendored
/// dependency directory name.
pub fn is_vendored(path: &str) -> bool {
    path.split('/').any(|segment| segment == VENDORED_DIR)
}

/// Anchors a possibly-relative path at the current directory and cleans
/// `.` and `..` segments lexically, without touching the file system.
pub fn absolutize(path: &Path) -> Result<PathBuf, Error> {
    let joined =
        if path.is_absolute() { path.to_path_buf() } else { env::current_dir()?.join(path) };
    let cleaned = clean(joined);
    trace!("Absolutized {} to {}", path.display(), cleaned.display());
    Ok(cleaned)
}
