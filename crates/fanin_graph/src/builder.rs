use log::{debug, trace};

use fanin_core::{Compilation, FileSet, ImportKind, is_vendored, to_forward_slashes};

use crate::graph::ExportGraph;
use crate::options::EdgeFilter;

/// Reduces a compilation's module records into the raw export graph.
///
/// A module contributes edges only when its resolved path exists, is not
/// vendored, and is a member of `files`. Of its imports, only named static
/// bindings are considered, and the resolved dependency must be a member of
/// `files` as well. Records missing a path, symbol, or resolved module are
/// skipped. An optional `filter` can reject individual
/// (dependent, dependency) pairs. Empty records yield an empty graph.
pub fn build_graph(
    compilation: &Compilation,
    files: &FileSet,
    filter: Option<&EdgeFilter>,
) -> ExportGraph {
    debug!("Building export graph from {} module records", compilation.modules.len());
    let mut graph = ExportGraph::new();

    for module in &compilation.modules {
        let Some(path) = &module.path else {
            trace!("Skipping module without a resolved path");
            continue;
        };
        let dependent = to_forward_slashes(&path.to_string_lossy());
        if is_vendored(&dependent) {
            trace!("Skipping vendored module: {}", dependent);
            continue;
        }
        if !files.contains(&dependent) {
            trace!("Skipping module outside the included set: {}", dependent);
            continue;
        }

        for import in &module.imports {
            if import.kind != ImportKind::Named {
                trace!("Ignoring {:?} import in {}", import.kind, dependent);
                continue;
            }
            let Some(symbol) = &import.symbol else {
                trace!("Skipping named import without a symbol in {}", dependent);
                continue;
            };
            let Some(resolved) = &import.resolved else {
                trace!(
                    "Skipping import of '{}' without a resolved module in {}",
                    symbol, dependent
                );
                continue;
            };
            let dependency = to_forward_slashes(&resolved.to_string_lossy());
            if !files.contains(&dependency) {
                trace!("Skipping dependency outside the included set: {}", dependency);
                continue;
            }
            if let Some(filter) = filter
                && !filter(&dependent, &dependency)
            {
                trace!("Filter rejected edge {} -> {}", dependent, dependency);
                continue;
            }
            graph.record(&dependency, symbol, &dependent);
        }
    }

    debug!(
        "Graph has {} dependency files and {} symbols",
        graph.dependency_count(),
        graph.symbol_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanin_core::{ImportRecord, ModuleRecord};
    use std::path::PathBuf;

    fn named(symbol: &str, resolved: &str) -> ImportRecord {
        ImportRecord {
            kind: ImportKind::Named,
            symbol: Some(symbol.to_string()),
            resolved: Some(PathBuf::from(resolved)),
        }
    }

    fn module(path: &str, imports: Vec<ImportRecord>) -> ModuleRecord {
        ModuleRecord { path: Some(PathBuf::from(path)), imports }
    }

    fn compilation(modules: Vec<ModuleRecord>) -> Compilation {
        Compilation { context: PathBuf::from("/project"), modules }
    }

    fn project_files() -> FileSet {
        FileSet::from_paths(["/project/a.js", "/project/b.js", "/project/c.js", "/project/d.js"])
    }

    #[test]
    fn test_named_imports_accumulate() {
        let compilation = compilation(vec![
            module("/project/a.js", vec![named("foo", "/project/b.js")]),
            module("/project/d.js", vec![named("foo", "/project/b.js")]),
        ]);

        let graph = build_graph(&compilation, &project_files(), None);

        let dependents = graph.dependents("/project/b.js", "foo").unwrap();
        assert_eq!(dependents.len(), 2);
        assert!(dependents.contains("/project/a.js"));
        assert!(dependents.contains("/project/d.js"));
    }

    #[test]
    fn test_multiple_symbols_from_one_dependency() {
        let compilation = compilation(vec![module(
            "/project/a.js",
            vec![named("foo", "/project/b.js"), named("bar", "/project/b.js")],
        )]);

        let graph = build_graph(&compilation, &project_files(), None);

        assert_eq!(graph.dependency_count(), 1);
        assert_eq!(graph.symbol_count(), 2);
    }

    #[test]
    fn test_non_named_imports_ignored() {
        let make = |kind| ImportRecord {
            kind,
            symbol: Some("foo".to_string()),
            resolved: Some(PathBuf::from("/project/b.js")),
        };
        let compilation = compilation(vec![module(
            "/project/a.js",
            vec![
                make(ImportKind::Default),
                make(ImportKind::Namespace),
                make(ImportKind::Dynamic),
                make(ImportKind::Unresolved),
            ],
        )]);

        let graph = build_graph(&compilation, &project_files(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_records_missing_fields_are_skipped() {
        let compilation = compilation(vec![
            ModuleRecord { path: None, imports: vec![named("foo", "/project/b.js")] },
            module(
                "/project/a.js",
                vec![
                    ImportRecord {
                        kind: ImportKind::Named,
                        symbol: None,
                        resolved: Some(PathBuf::from("/project/b.js")),
                    },
                    ImportRecord {
                        kind: ImportKind::Named,
                        symbol: Some("foo".to_string()),
                        resolved: None,
                    },
                ],
            ),
        ]);

        let graph = build_graph(&compilation, &project_files(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_module_outside_included_set_skipped() {
        let compilation =
            compilation(vec![module("/project/build/gen.js", vec![named("foo", "/project/b.js")])]);

        let graph = build_graph(&compilation, &project_files(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_dependency_outside_included_set_skipped() {
        let compilation =
            compilation(vec![module("/project/a.js", vec![named("foo", "/project/vendor.js")])]);

        let graph = build_graph(&compilation, &project_files(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_vendored_paths_never_enter_graph() {
        let vendored = "/project/node_modules/lib/index.js";
        let files = FileSet::from_paths(["/project/a.js", "/project/b.js", vendored]);
        let compilation = compilation(vec![
            module(vendored, vec![named("foo", "/project/b.js")]),
            module("/project/a.js", vec![named("bar", vendored)]),
        ]);

        let graph = build_graph(&compilation, &files, None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_all_edge_endpoints_stay_in_the_included_set() {
        let files = project_files();
        let compilation = compilation(vec![
            module("/project/a.js", vec![named("foo", "/project/b.js")]),
            module(
                "/project/d.js",
                vec![named("foo", "/project/b.js"), named("baz", "/project/c.js")],
            ),
            module("/project/outside.js", vec![named("foo", "/project/b.js")]),
            module("/project/a.js", vec![named("qux", "/project/missing.js")]),
        ]);

        let graph = build_graph(&compilation, &files, None);

        for (dependency, symbols) in graph.iter() {
            assert!(files.contains(dependency));
            assert!(!is_vendored(dependency));
            for dependents in symbols.values() {
                for dependent in dependents {
                    assert!(files.contains(dependent));
                    assert!(!is_vendored(dependent));
                }
            }
        }
        assert_eq!(graph.dependency_count(), 2);
    }

    #[test]
    fn test_duplicate_module_records_tolerated() {
        let record = module("/project/a.js", vec![named("foo", "/project/b.js")]);
        let compilation = compilation(vec![record.clone(), record]);

        let graph = build_graph(&compilation, &project_files(), None);
        assert_eq!(graph.dependents("/project/b.js", "foo").unwrap().len(), 1);
    }

    #[test]
    fn test_filter_rejects_edges() {
        let compilation = compilation(vec![
            module("/project/a.js", vec![named("foo", "/project/b.js")]),
            module("/project/a.js", vec![named("baz", "/project/c.js")]),
        ]);
        let filter: Box<EdgeFilter> = Box::new(|_, dependency| !dependency.contains("b.js"));

        let graph = build_graph(&compilation, &project_files(), Some(&filter));

        assert!(graph.dependents("/project/b.js", "foo").is_none());
        assert!(graph.dependents("/project/c.js", "baz").is_some());
    }

    #[test]
    fn test_backslash_paths_normalized_before_matching() {
        let compilation = compilation(vec![module(
            "C:\\project\\a.js",
            vec![named("foo", "C:\\project\\b.js")],
        )]);
        let files = FileSet::from_paths(["C:/project/a.js", "C:/project/b.js"]);

        let graph = build_graph(&compilation, &files, None);
        assert!(graph.dependents("C:/project/b.js", "foo").is_some());
    }

    #[test]
    fn test_empty_compilation_yields_empty_graph() {
        let graph = build_graph(&compilation(Vec::new()), &project_files(), None);
        assert!(graph.is_empty());
    }
}
