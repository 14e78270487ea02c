//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `spark-adapters` crate provides implementations; the prompter lives in
//! `spark-cli` because it owns the terminal.

use std::path::Path;

use crate::domain::{Framework, HostApplication, RenderContext, ScaffoldAnswers, TemplateBundle, Variant};
use crate::error::SparkResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `spark_adapters::filesystem::LocalFilesystem` (production)
/// - `spark_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> SparkResult<String>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &[u8]) -> SparkResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SparkResult<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Port for template bundles.
///
/// Implemented by:
/// - `spark_adapters::template_store::BuiltinStore` (compiled in)
/// - `spark_adapters::template_store::DirectoryStore` (a local directory)
pub trait TemplateStore: Send + Sync {
    fn load(&self, framework: Framework) -> SparkResult<TemplateBundle>;
}

/// Port for rendering one template text.
///
/// Rendering is strict: an undefined variable or helper is an
/// `ApplicationError::UnboundVariable`, never an empty string.
pub trait TemplateRenderer: Send + Sync {
    /// `name` identifies the template in error messages.
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> SparkResult<String>;
}

/// Port for finding the current library version.
#[cfg_attr(test, mockall::automock)]
pub trait VersionLookup: Send + Sync {
    fn latest(&self, artifact: &str) -> SparkResult<String>;
}

/// What the prompter needs to ask sensible questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub host: HostApplication,
    pub default_variant: Option<Variant>,
    pub default_framework: Framework,
}

impl PromptRequest {
    /// Variants a project for this host can take.
    pub fn variants(&self) -> Vec<Variant> {
        Variant::ALL
            .into_iter()
            .filter(|v| v.supported_on(self.host))
            .collect()
    }
}

/// Port for collecting the user's answers.
///
/// Returns `ApplicationError::Cancelled` when the user declines.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn collect(&self, request: &PromptRequest) -> SparkResult<ScaffoldAnswers>;
}
