use std::{fmt, path::PathBuf};

/// Optional per-edge inclusion predicate, called as
/// `filter(dependent_path, dependency_path)`.
///
/// Must be pure: edges are visited in build-dependent order, so a predicate
/// with observable side effects produces unstable results.
pub type EdgeFilter = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Configuration for one report run. Every field has a usable default.
pub struct Options {
    /// Glob patterns for files eligible for inclusion in the graph.
    /// Defaults to `["**/*.*"]`.
    pub patterns: Vec<String>,
    /// Glob patterns to omit even if matched by `patterns`. Defaults to none.
    pub exclude: Vec<String>,
    /// Base directory for pattern resolution and output path relativization.
    /// Defaults to the compilation's context.
    pub context: Option<PathBuf>,
    /// Where the JSON artifact is written. Defaults to `graph.json`; a
    /// relative path lands under the process working directory.
    pub output: PathBuf,
    /// Whether dependent sets are emitted as counts or full path lists.
    /// Defaults to [`Verbosity::Info`].
    pub verbosity: Verbosity,
    /// Minimum dependent count for a symbol to be reported. Defaults to 2.
    pub min_deps: usize,
    /// Optional extra inclusion predicate per edge. Defaults to none.
    pub filter: Option<Box<EdgeFilter>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            patterns: vec!["**/*.*".to_string()],
            exclude: Vec::new(),
            context: None,
            output: PathBuf::from("graph.json"),
            verbosity: Verbosity::Info,
            min_deps: 2,
            filter: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("patterns", &self.patterns)
            .field("exclude", &self.exclude)
            .field("context", &self.context)
            .field("output", &self.output)
            .field("verbosity", &self.verbosity)
            .field("min_deps", &self.min_deps)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Output verbosity for dependent sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Emit the dependent count per symbol.
    #[default]
    Info,
    /// Emit the full list of dependent paths per symbol.
    Verbose,
}
