//! Template bundle stores.
//!
//! Every bundle carries a `template.toml`:
//!
//! ```toml
//! [template]
//! framework = "react"          # angular1 | angular2 | react
//!
//! [metadata]
//! name        = "ReactJS"
//! description = "..."          # optional
//! ```

mod builtin;
mod directory;
mod manifest;

pub use builtin::BuiltinStore;
pub use directory::DirectoryStore;
pub use manifest::{BundleManifest, MANIFEST_FILE};
