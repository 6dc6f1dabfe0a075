//! The export usage reporter itself: wires file selection, graph
//! construction, and artifact emission into one post-build step.

use std::path::PathBuf;

use log::{debug, info};

use fanin_core::{AfterEmit, Compilation, Error, FileSet, absolutize, to_forward_slashes};

use crate::builder::build_graph;
use crate::emit::{normalize_graph, write_graph};
use crate::options::Options;

/// Inspects a finished compilation and writes the export usage graph.
///
/// Configure once, then either attach to a host build through [`AfterEmit`]
/// or drive directly with [`report`](Self::report).
#[derive(Debug)]
pub struct ExportGraphPlugin {
    options: Options,
}

/// What a single report produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Files matched by the configured patterns.
    pub files_selected: usize,
    /// Dependency files with at least one surviving symbol.
    pub dependency_files: usize,
    /// Symbols that met the fan-in threshold.
    pub symbols_reported: usize,
    /// Where the JSON artifact was written.
    pub output: PathBuf,
}

impl ExportGraphPlugin {
    pub fn new(options: Options) -> Self {
        ExportGraphPlugin { options }
    }

    /// Runs the full pipeline: select files, build the raw graph, apply the
    /// fan-in threshold, and write the JSON artifact.
    pub fn report(&self, compilation: &Compilation) -> Result<ReportSummary, Error> {
        let context = match &self.options.context {
            Some(dir) => dir.clone(),
            None => compilation.context.clone(),
        };
        let context = absolutize(&context)?;
        let context_key = to_forward_slashes(&context.to_string_lossy());
        debug!("Reporting export usage under {}", context_key);

        let files = FileSet::select(&context, &self.options.patterns, &self.options.exclude)?;
        info!("Selected {} files for analysis", files.len());

        let graph = build_graph(compilation, &files, self.options.filter.as_deref());
        let normalized =
            normalize_graph(&graph, &context_key, self.options.min_deps, self.options.verbosity);
        write_graph(&normalized, &self.options.output)?;

        let summary = ReportSummary {
            files_selected: files.len(),
            dependency_files: normalized.len(),
            symbols_reported: normalized.values().map(|symbols| symbols.len()).sum(),
            output: self.options.output.clone(),
        };
        info!(
            "Reported {} symbols across {} files to {}",
            summary.symbols_reported,
            summary.dependency_files,
            summary.output.display()
        );
        Ok(summary)
    }
}

impl AfterEmit for ExportGraphPlugin {
    fn after_emit(&self, compilation: &Compilation) -> Result<(), Error> {
        self.report(compilation).map(|_| ())
    }
}
