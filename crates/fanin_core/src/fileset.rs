use std::{collections::HashSet, path::Path};

use ignore::{WalkBuilder, overrides::OverrideBuilder};
use log::{debug, trace};

use crate::error::Error;
use crate::paths::{absolutize, is_vendored, to_forward_slashes};

/// The set of files a report may mention.
///
/// Built once per run from glob patterns and immutable afterward. Every
/// member is a normalized absolute path, and no member lies under a
/// vendored dependency directory.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: HashSet<String>,
}

impl FileSet {
    /// Expands include/exclude globs against `context` into a concrete set of
    /// files on disk.
    ///
    /// Include patterns are anchored at `context` and excludes are applied as
    /// negations after them, so an exclude wins over any include it overlaps
    /// with, independent of the order either list was given in. An empty
    /// include list selects nothing. Hidden files, and anything under a
    /// hidden directory, are not matched. Vendored paths are never admitted,
    /// even when an include matches them.
    ///
    /// Fails with [`Error::ContextNotFound`] if `context` is not a directory
    /// and [`Error::InvalidPattern`] if a glob does not parse.
    pub fn select(context: &Path, patterns: &[String], exclude: &[String]) -> Result<Self, Error> {
        let context = absolutize(context)?;
        if !context.is_dir() {
            return Err(Error::ContextNotFound(context));
        }
        debug!("Selecting files under {}", context.display());
        if patterns.is_empty() {
            debug!("No include patterns, selecting no files");
            return Ok(FileSet::default());
        }

        let mut overrides = OverrideBuilder::new(&context);
        for pattern in patterns {
            let pattern = to_forward_slashes(pattern);
            trace!("Include pattern: {}", pattern);
            overrides
                .add(&pattern)
                .map_err(|source| Error::InvalidPattern { pattern: pattern.clone(), source })?;
        }
        for pattern in exclude {
            let pattern = format!("!{}", to_forward_slashes(pattern));
            trace!("Exclude pattern: {}", pattern);
            overrides
                .add(&pattern)
                .map_err(|source| Error::InvalidPattern { pattern: pattern.clone(), source })?;
        }
        let overrides = overrides.build()?;

        let mut files = HashSet::new();
        // An override whitelist match bypasses the walker's hidden filter,
        // so hidden entries are pruned explicitly.
        let walker = WalkBuilder::new(&context)
            .standard_filters(false)
            .hidden(true)
            .overrides(overrides)
            .filter_entry(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .build();
        for res in walker {
            let dent = res?;
            let p = dent.path();
            if !p.is_file() {
                continue;
            }
            let path = to_forward_slashes(&p.to_string_lossy());
            if is_vendored(&path) {
                trace!("Skipping vendored file: {}", path);
                continue;
            }
            trace!("Selected file: {}", path);
            files.insert(path);
        }
        debug!("Selected {} files", files.len());
        Ok(FileSet { files })
    }

    /// Builds a set from already-known paths, normalizing each and dropping
    /// vendored entries.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = paths
            .into_iter()
            .map(|p| to_forward_slashes(p.as_ref()))
            .filter(|p| !is_vendored(p))
            .collect();
        FileSet { files }
    }

    /// Membership test for a normalized path.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files were selected.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates the normalized paths in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}
