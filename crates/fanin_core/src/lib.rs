//! Core utilities for fanin tools.
//!
//! This crate provides the boundary model and file-system plumbing shared by
//! the export fan-in report pass, including:
//! - Normalizing file-system paths to a forward-slash convention
//! - Expanding glob include/exclude patterns into an included-file set
//! - The compilation model a host bundler hands to the pass (modules,
//!   import records, import-kind discriminator)
//! - The post-emit hook through which a host invokes the pass

mod compilation;
mod error;
mod fileset;
mod hooks;
mod paths;

// Re-export public API
pub use compilation::{Compilation, ImportKind, ImportRecord, ModuleRecord};
pub use error::Error;
pub use fileset::FileSet;
pub use hooks::AfterEmit;
pub use paths::{absolutize, is_vendored, strip_context, to_forward_slashes};
