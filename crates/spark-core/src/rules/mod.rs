//! The concrete patch rules for the two descriptors of a plugin project.

pub mod build_descriptor;
pub mod plugin_descriptor;

pub use plugin_descriptor::ModuleFragment;
