//! Infrastructure adapters for SPARK.
//!
//! This crate implements the ports defined in `spark_core::application::ports`:
//! filesystem access, template bundle stores, the strict template renderer and
//! the library version lookup. It contains all external dependencies and I/O.

pub mod filesystem;
pub mod renderer;
pub mod template_store;
pub mod version_lookup;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::JinjaRenderer;
pub use template_store::{BuiltinStore, DirectoryStore};
pub use version_lookup::{FixedVersion, MavenCentralLookup, OfflineLookup};
