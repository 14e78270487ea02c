//! Unified error handling for SPARK scaffolding.
//!
//! Wraps domain, patch and application errors in one type that carries a
//! category for exit codes and user-facing suggestions.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::patch::PatchError;

/// Root error type for spark-core operations.
#[derive(Debug, Error, Clone)]
pub enum SparkError {
    /// The project or the answers violate a domain rule.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A descriptor could not be patched.
    #[error("{}: {source}", path.display())]
    Patch {
        path: PathBuf,
        #[source]
        source: PatchError,
    },

    /// Orchestration failures (files, templates, rendering).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SparkError {
    pub fn patch(path: impl Into<PathBuf>, source: PatchError) -> Self {
        Self::Patch {
            path: path.into(),
            source,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Patch { source, .. } => match source {
                PatchError::MalformedDocument { .. } => vec![
                    "Fix the XML syntax error and run again".into(),
                    "Nothing was written".into(),
                ],
                PatchError::StructuralPrecondition { .. } => vec![
                    "The file is missing an element the change must be anchored to".into(),
                    "Add the element by hand, or restore the file from version control".into(),
                ],
                PatchError::InvalidPath { .. } | PatchError::StaleAnchor => vec![
                    "This appears to be a bug in spark".into(),
                ],
            },
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file and SPARK_* environment variables".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in spark".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Patch { source, .. } => match source {
                PatchError::MalformedDocument { .. } => ErrorCategory::Validation,
                PatchError::StructuralPrecondition { .. } => ErrorCategory::Compatibility,
                PatchError::InvalidPath { .. } | PatchError::StaleAnchor => {
                    ErrorCategory::Internal
                }
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True when the user stopped the run at a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::Cancelled))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SparkResult<T> = Result<T, SparkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_errors_name_the_file() {
        let err = SparkError::patch(
            "pom.xml",
            PatchError::StructuralPrecondition {
                rule: "spark-dependency".into(),
                tried: vec!["project (closing tag)".into()],
            },
        );
        let message = err.to_string();
        assert!(message.starts_with("pom.xml: "), "{message}");
        assert!(message.contains("spark-dependency"));
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn domain_categories_carry_over() {
        let err: SparkError = DomainError::UnsupportedPackaging { found: "jar".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Compatibility);
        assert!(!err.suggestions().is_empty());
    }
}
