//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffold stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A descriptor the run depends on does not exist.
    #[error("{} not found", path.display())]
    MissingFile { path: PathBuf },

    /// The module directory is already there.
    #[error("module '{key}' already exists at {}", path.display())]
    DuplicateTarget { key: String, path: PathBuf },

    /// A template referenced a variable or helper the context does not have.
    #[error("template '{template}' references an undefined value: {detail}")]
    UnboundVariable { template: String, detail: String },

    /// Template rendering failed for another reason (syntax, type errors).
    #[error("template '{template}' failed to render: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The dependency manifest or the fragment is not valid JSON.
    #[error("cannot merge {}: {reason}", path.display())]
    ManifestMerge { path: PathBuf, reason: String },

    /// No bundle for the requested framework.
    #[error("no template bundle for '{name}': {reason}")]
    TemplateNotFound { name: String, reason: String },

    /// The current library version could not be determined.
    #[error("cannot look up the latest version of {artifact}: {reason}")]
    VersionLookup { artifact: String, reason: String },

    /// The user declined the confirmation prompt.
    #[error("cancelled")]
    Cancelled,

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingFile { path } => vec![
                format!("Expected to find {}", path.display()),
                "Run spark from the root of an Atlassian plugin project".into(),
                "Or point it at one with --project-dir".into(),
            ],
            Self::DuplicateTarget { .. } => vec![
                "Choose a different module key".into(),
                "Or remove the existing module directory first".into(),
            ],
            Self::UnboundVariable { .. } | Self::RenderingFailed { .. } => vec![
                "The template and the values spark provides do not agree".into(),
                "If you use --templates, check the bundle against the built-in one".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ManifestMerge { path, .. } => vec![
                format!("Fix the JSON in {}", path.display()),
                "Files patched before this step are kept; re-running is safe".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Built-in bundles: angular1, angular2, react".into(),
                "Check the directory passed with --templates".into(),
            ],
            Self::VersionLookup { .. } => vec![
                "Check your network connection".into(),
                "Or pass --offline to use the configured fallback version".into(),
            ],
            Self::Cancelled => vec!["Nothing was changed".into()],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFile { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateTarget { .. } | Self::Cancelled => ErrorCategory::Validation,
            Self::ManifestMerge { .. } => ErrorCategory::Validation,
            Self::UnboundVariable { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::VersionLookup { .. } => ErrorCategory::Configuration,
        }
    }
}
