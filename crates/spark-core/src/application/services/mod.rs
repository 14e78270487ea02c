//! Application services - orchestrate use cases.
//!
//! [`ScaffoldService`] runs the whole scaffold; the other modules are the
//! pieces its stages are built from.

pub mod manifest;
pub mod patching;
pub mod scaffold_service;
pub mod template_copier;

#[cfg(test)]
pub(crate) mod test_support;

pub use patching::run_pipeline;
pub use scaffold_service::{DEFAULT_SPARK_VERSION, STAGES, ScaffoldService, ScaffoldSettings};
pub use template_copier::copy_tree;
