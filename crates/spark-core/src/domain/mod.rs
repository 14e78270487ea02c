//! Core domain layer for SPARK scaffolding.
//!
//! This module contains pure data and rules with no I/O. Reading and writing
//! files, rendering templates and talking to the network are done through the
//! ports defined in the application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: the render context never changes once built
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    project_context::{
        BUILD_DESCRIPTOR, BuildFacts, ChangeKind, DEPENDENCY_MANIFEST, DescriptorFile,
        FileChange, PLUGIN_DESCRIPTOR, ProjectContext, ScaffoldReport,
    },
    render_context::{FRONTEND_DIR, RenderContext, ScaffoldAnswers},
    template::{
        APP_TREE, HOST_STUB, MANIFEST_FRAGMENT, MODULE_FRAGMENT, TEMPLATE_SUFFIX, TemplateBundle,
        TemplateFile, TemplateMetadata,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Framework, HostApplication, ModuleKey, Variant};
