//! Export usage reporting for JavaScript/TypeScript builds.
//!
//! This crate inspects a finished bundler compilation and records which files
//! import which named exports from which other files, then writes the result
//! as a JSON dependency graph filtered by a fan-in threshold.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fanin_core::Compilation;
//! use fanin_graph::{ExportGraphPlugin, Options};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fanin_core::Error> {
//! let compilation = Compilation::from_json_file(Path::new("compilation.json"))?;
//!
//! let plugin = ExportGraphPlugin::new(Options {
//!     patterns: vec!["src/**/*.ts".to_string()],
//!     min_deps: 3,
//!     ..Options::default()
//! });
//!
//! let summary = plugin.report(&compilation)?;
//! println!("{} symbols written to {}", summary.symbols_reported, summary.output.display());
//! # Ok(())
//! # }
//! ```

mod builder;
mod emit;
mod graph;
mod options;
mod plugin;

// Re-export public API
pub use builder::build_graph;
pub use emit::{NormalizedGraph, SymbolUsage, normalize_graph, write_graph};
pub use graph::ExportGraph;
pub use options::{EdgeFilter, Options, Verbosity};
pub use plugin::{ExportGraphPlugin, ReportSummary};
