//! Application layer for SPARK.
//!
//! This layer contains:
//! - **Services**: the scaffold orchestrator and the pieces its stages use
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules live in `crate::domain`; the descriptor patch rules live in
//! `crate::rules`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{DEFAULT_SPARK_VERSION, ScaffoldService, ScaffoldSettings};

pub use ports::{Filesystem, PromptRequest, Prompter, TemplateRenderer, TemplateStore, VersionLookup};

pub use error::ApplicationError;
