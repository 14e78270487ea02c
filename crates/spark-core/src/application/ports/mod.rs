//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template bundle retrieval
//!   - `TemplateRenderer`: Strict template rendering
//!   - `VersionLookup`: Latest library version
//!   - `Prompter`: Answers from the user

pub mod output;

pub use output::{Filesystem, PromptRequest, Prompter, TemplateRenderer, TemplateStore, VersionLookup};

#[cfg(test)]
pub use output::{MockPrompter, MockVersionLookup};
