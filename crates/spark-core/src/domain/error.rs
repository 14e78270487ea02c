// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through the stage driver by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Project shape (the host project is not one we support)
    // ========================================================================
    #[error("packaging '{found}' is not supported (expected 'atlassian-plugin')")]
    UnsupportedPackaging { found: String },

    #[error("no supported host application plugin found in the build descriptor")]
    UnsupportedHostApplication { found: Vec<String> },

    #[error("a {variant} app cannot be added to a {host} plugin")]
    UnsupportedVariantForHost { variant: String, host: String },

    // ========================================================================
    // User input
    // ========================================================================
    #[error("invalid module key '{key}': {reason}")]
    InvalidModuleKey { key: String, reason: String },

    #[error("unknown {field} '{value}'")]
    UnknownValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Templates
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedPackaging { .. } => vec![
                "SPARK modules can only be added to Atlassian plugin projects".into(),
                "Set <packaging>atlassian-plugin</packaging> in pom.xml".into(),
            ],
            Self::UnsupportedHostApplication { found } => {
                let mut out = vec!["Supported build plugins:".to_string()];
                out.extend(
                    crate::domain::HostApplication::supported_artifacts()
                        .into_iter()
                        .map(|a| format!("  • {a}")),
                );
                if !found.is_empty() {
                    out.push(format!("Found: {}", found.join(", ")));
                }
                out
            }
            Self::UnsupportedVariantForHost { .. } => vec![
                "Space apps are only available for Confluence".into(),
                "Choose the admin or dialog variant instead".into(),
            ],
            Self::InvalidModuleKey { .. } => vec![
                "Use alphanumeric characters, '-' and '_'".into(),
                "Examples: my-app, admin_console, dialog2".into(),
            ],
            Self::UnknownValue {
                field, expected, ..
            } => vec![format!("Valid values for {field}: {expected}")],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
            Self::InvalidTemplate(msg) => vec![
                format!("Details: {msg}"),
                "Check the bundle under your configured templates directory".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedPackaging { .. }
            | Self::UnsupportedHostApplication { .. }
            | Self::UnsupportedVariantForHost { .. } => ErrorCategory::Compatibility,
            Self::InvalidModuleKey { .. }
            | Self::UnknownValue { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
