//! SPARK Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain, the XML patch engine and the application
//! layer of the SPARK scaffolder, which adds a single-page-app module to an
//! existing Atlassian plugin project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            spark-cli (CLI)              │
//! │   args, config, prompts, output          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      ScaffoldService (stage table)       │
//! └───────┬──────────────────────┬──────────┘
//!         │ patches with          │ uses
//!         ▼                       ▼
//! ┌──────────────────┐  ┌──────────────────────┐
//! │ patch + rules    │  │ ports (traits)        │
//! │ (pure, no I/O)   │  │ implemented by        │
//! └──────────────────┘  │ spark-adapters        │
//!                       └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spark_core::application::ScaffoldService;
//! # fn ports() -> (
//! #     Box<dyn spark_core::application::Filesystem>,
//! #     Box<dyn spark_core::application::TemplateStore>,
//! #     Box<dyn spark_core::application::TemplateRenderer>,
//! #     Box<dyn spark_core::application::VersionLookup>,
//! #     Box<dyn spark_core::application::Prompter>,
//! # ) { unimplemented!() }
//!
//! let (filesystem, store, renderer, versions, prompter) = ports();
//! let service = ScaffoldService::new(filesystem, store, renderer, versions, prompter);
//! let report = service.scaffold(".").unwrap();
//! for change in &report.changes {
//!     println!("{}", change.path.display());
//! }
//! ```

pub mod domain;

pub mod patch;

pub mod rules;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ScaffoldService, ScaffoldSettings,
        ports::{Filesystem, PromptRequest, Prompter, TemplateRenderer, TemplateStore, VersionLookup},
    };
    pub use crate::domain::{
        Framework, HostApplication, ModuleKey, RenderContext, ScaffoldAnswers, ScaffoldReport,
        TemplateBundle, TemplateFile, TemplateMetadata, Variant,
    };
    pub use crate::error::{SparkError, SparkResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
