//! Bundler-boundary model of a finished compilation.
//!
//! A host bundler hands the report pass its post-compilation module and
//! import-dependency records in this shape, either in process or as a JSON
//! dump across a process boundary. The records are trusted as given; no
//! resolution or validation happens on this side.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Post-compilation records extracted from a host bundler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compilation {
    /// Root context directory of the build, the default base directory for
    /// pattern resolution and path relativization.
    pub context: PathBuf,
    /// Module records observed in the compilation. May list the same module
    /// more than once when the host reports per-chunk module lists.
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
}

impl Compilation {
    /// Loads a compilation dump from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let compilation: Compilation = serde_json::from_str(&text)?;
        debug!(
            "Loaded compilation dump from {} with {} module records",
            path.display(),
            compilation.modules.len()
        );
        Ok(compilation)
    }
}

/// One compiled module and the imports it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Resolved file-system path of the module. Absent for synthetic modules,
    /// which never contribute edges.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Import-dependency records of the module.
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
}

/// One import-dependency record of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Classification of the import binding.
    #[serde(default)]
    pub kind: ImportKind,
    /// Exported-symbol identifier the binding refers to. Carried by named
    /// imports; absent otherwise.
    #[serde(default)]
    pub symbol: Option<String>,
    /// File-system path of the resolved dependency module. Absent when the
    /// host could not resolve the request.
    #[serde(default)]
    pub resolved: Option<PathBuf>,
}

/// Discriminator for import bindings. Only `Named` records contribute to the
/// export graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// Static import of a named export binding.
    Named,
    /// Static import of a default export.
    Default,
    /// Static namespace import.
    Namespace,
    /// Dynamic import expression.
    Dynamic,
    /// Import whose target the host could not resolve.
    #[default]
    Unresolved,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_dump() {
        let temp_dir = TempDir::new().unwrap();
        let dump = temp_dir.path().join("compilation.json");
        fs::write(
            &dump,
            r#"{
  "context": "/project",
  "modules": [
    {
      "path": "/project/a.js",
      "imports": [
        { "kind": "named", "symbol": "foo", "resolved": "/project/b.js" },
        { "kind": "dynamic", "resolved": "/project/lazy.js" }
      ]
    }
  ]
}"#,
        )
        .unwrap();

        let compilation = Compilation::from_json_file(&dump).unwrap();
        assert_eq!(compilation.context, PathBuf::from("/project"));
        assert_eq!(compilation.modules.len(), 1);

        let module = &compilation.modules[0];
        assert_eq!(module.path, Some(PathBuf::from("/project/a.js")));
        assert_eq!(module.imports.len(), 2);
        assert_eq!(module.imports[0].kind, ImportKind::Named);
        assert_eq!(module.imports[0].symbol.as_deref(), Some("foo"));
        assert_eq!(module.imports[1].kind, ImportKind::Dynamic);
        assert_eq!(module.imports[1].symbol, None);
    }

    #[test]
    fn test_partial_records_use_defaults() {
        let json = r#"{ "context": "/project", "modules": [ {}, { "path": "/project/a.js" } ] }"#;
        let compilation: Compilation = serde_json::from_str(json).unwrap();

        assert_eq!(compilation.modules[0].path, None);
        assert!(compilation.modules[0].imports.is_empty());
        assert_eq!(compilation.modules[1].path, Some(PathBuf::from("/project/a.js")));
    }

    #[test]
    fn test_missing_kind_defaults_to_unresolved() {
        let json = r#"{ "symbol": "foo", "resolved": "/project/b.js" }"#;
        let import: ImportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(import.kind, ImportKind::Unresolved);
    }

    #[test]
    fn test_kind_uses_snake_case_tags() {
        assert_eq!(serde_json::from_str::<ImportKind>("\"named\"").unwrap(), ImportKind::Named);
        assert_eq!(
            serde_json::from_str::<ImportKind>("\"namespace\"").unwrap(),
            ImportKind::Namespace
        );
        assert_eq!(serde_json::to_string(&ImportKind::Default).unwrap(), "\"default\"");
    }

    #[test]
    fn test_malformed_dump_is_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let dump = temp_dir.path().join("compilation.json");
        fs::write(&dump, "{ not json").unwrap();

        let err = Compilation::from_json_file(&dump).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unreadable_dump_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");

        let err = Compilation::from_json_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
