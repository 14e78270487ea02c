use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{render_context::RenderContext, template::TemplateBundle},
    error::DomainError,
    value_objects::HostApplication,
};

pub const BUILD_DESCRIPTOR: &str = "pom.xml";
pub const PLUGIN_DESCRIPTOR: &str = "src/main/resources/atlassian-plugin.xml";
pub const DEPENDENCY_MANIFEST: &str = "src/main/frontend/package.json";

/// Facts read from the build descriptor before anything is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFacts {
    pub packaging: String,
    pub group_id: String,
    pub artifact_id: String,
    pub host: HostApplication,
    /// Artifact id of the build plugin the host was detected from.
    pub host_plugin: String,
}

/// A descriptor file as it was read at the start of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    pub path: PathBuf,
    pub text: String,
}

/// Aggregate owned by one orchestrator run. Each stage fills in what later
/// stages read; nothing survives the run.
#[derive(Debug, Default)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub build_descriptor: Option<DescriptorFile>,
    pub build_facts: Option<BuildFacts>,
    pub plugin_descriptor: Option<DescriptorFile>,
    pub render: Option<RenderContext>,
    pub template: Option<TemplateBundle>,
    pub report: ScaffoldReport,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// `path` relative to the project root, for reporting.
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    pub fn facts(&self) -> Result<&BuildFacts, DomainError> {
        self.build_facts
            .as_ref()
            .ok_or(DomainError::MissingRequiredField { field: "build descriptor" })
    }

    pub fn build_descriptor(&self) -> Result<&DescriptorFile, DomainError> {
        self.build_descriptor
            .as_ref()
            .ok_or(DomainError::MissingRequiredField { field: "build descriptor" })
    }

    pub fn plugin_descriptor(&self) -> Result<&DescriptorFile, DomainError> {
        self.plugin_descriptor
            .as_ref()
            .ok_or(DomainError::MissingRequiredField { field: "plugin descriptor" })
    }

    pub fn render_context(&self) -> Result<&RenderContext, DomainError> {
        self.render
            .as_ref()
            .ok_or(DomainError::MissingRequiredField { field: "configuration" })
    }

    pub fn template(&self) -> Result<&TemplateBundle, DomainError> {
        self.template
            .as_ref()
            .ok_or(DomainError::MissingRequiredField { field: "template" })
    }
}

/// What happened to one file during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// A patch pipeline ran; lists rule names.
    Patched {
        applied: Vec<String>,
        skipped: Vec<String>,
    },
    Created,
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Outcome of a run, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub changes: Vec<FileChange>,
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    pub fn record(&mut self, path: impl Into<PathBuf>, kind: ChangeKind) {
        self.changes.push(FileChange {
            path: path.into(),
            kind,
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Files that were actually modified or created.
    pub fn modified(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| match &c.kind {
            ChangeKind::Patched { applied, .. } => !applied.is_empty(),
            ChangeKind::Created | ChangeKind::Merged => true,
        })
    }
}
