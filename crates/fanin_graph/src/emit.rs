use std::{collections::BTreeMap, fs, path::Path};

use log::{debug, trace};
use serde::Serialize;

use fanin_core::{Error, strip_context};

use crate::graph::ExportGraph;
use crate::options::Verbosity;

/// How one symbol's dependents appear in the output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SymbolUsage {
    /// Number of distinct dependent files.
    Count(usize),
    /// Project-relative paths of the dependent files.
    Dependents(Vec<String>),
}

/// Output shape: project-relative dependency path to symbol to usage.
pub type NormalizedGraph = BTreeMap<String, BTreeMap<String, SymbolUsage>>;

/// Applies the fan-in threshold and context stripping to a raw graph.
///
/// Symbols with fewer than `min_deps` dependents are dropped, and dependency
/// entries left without any surviving symbol are omitted entirely. `context`
/// is expected in forward-slash form.
pub fn normalize_graph(
    graph: &ExportGraph,
    context: &str,
    min_deps: usize,
    verbosity: Verbosity,
) -> NormalizedGraph {
    debug!("Normalizing graph with min_deps={} ({:?})", min_deps, verbosity);
    let mut normalized = NormalizedGraph::new();

    for (dependency, symbols) in graph.iter() {
        let mut surviving = BTreeMap::new();
        for (symbol, dependents) in symbols {
            if dependents.len() < min_deps {
                trace!(
                    "Dropping '{}' from {} with {} dependents",
                    symbol,
                    dependency,
                    dependents.len()
                );
                continue;
            }
            let usage = match verbosity {
                Verbosity::Verbose => SymbolUsage::Dependents(
                    dependents.iter().map(|d| strip_context(d, context).to_string()).collect(),
                ),
                Verbosity::Info => SymbolUsage::Count(dependents.len()),
            };
            surviving.insert(symbol.clone(), usage);
        }
        if !surviving.is_empty() {
            normalized.insert(strip_context(dependency, context).to_string(), surviving);
        }
    }

    debug!("Normalized graph has {} dependency entries", normalized.len());
    normalized
}

/// Serializes a normalized graph as 2-space-indented JSON and writes it to
/// `output`, overwriting any existing file there.
pub fn write_graph(graph: &NormalizedGraph, output: &Path) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(graph)?;
    fs::write(output, json)?;
    debug!("Wrote graph artifact to {}", output.display());
    Ok(())
}
