use std::collections::{BTreeMap, BTreeSet};

/// Raw export fan-in graph: dependency file path to exported symbol to the
/// set of dependent file paths importing that symbol.
///
/// All three levels are ordered containers, so iteration follows natural key
/// order and emission stays deterministic for identical input. Dependent
/// sets are deduplicated. Every path stored here is a member of the file set
/// the graph was built against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportGraph {
    edges: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl ExportGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `dependent` imports `symbol` from `dependency`.
    ///
    /// Repeated observations of the same edge collapse into one entry.
    pub fn record(&mut self, dependency: &str, symbol: &str, dependent: &str) {
        self.edges
            .entry(dependency.to_string())
            .or_default()
            .entry(symbol.to_string())
            .or_default()
            .insert(dependent.to_string());
    }

    /// Dependents recorded for `symbol` under `dependency`, if any.
    pub fn dependents(&self, dependency: &str, symbol: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(dependency)?.get(symbol)
    }

    /// Iterates dependency entries in natural key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, BTreeSet<String>>)> {
        self.edges.iter()
    }

    /// Number of dependency files with at least one recorded symbol.
    pub fn dependency_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of (dependency, symbol) pairs recorded.
    pub fn symbol_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// True when no edge has been recorded.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
