use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by file selection, dump loading, and artifact writing.
///
/// Malformed module records are not represented here: a record missing a
/// path, symbol, or resolved module is skipped during graph construction
/// rather than failing the run.
#[derive(Debug, Error)]
pub enum Error {
    /// The base directory for pattern resolution does not exist.
    #[error("context directory not found: {0}")]
    ContextNotFound(PathBuf),

    /// A glob pattern failed to parse.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// File-system traversal failed during glob expansion.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A compilation dump could not be parsed.
    #[error("malformed compilation dump: {0}")]
    Json(#[from] serde_json::Error),
}
