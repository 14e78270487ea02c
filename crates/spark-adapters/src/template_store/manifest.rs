//! `template.toml` of a bundle.

use serde::Deserialize;

use spark_core::domain::{DomainError, Framework, TemplateMetadata};

pub const MANIFEST_FILE: &str = "template.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct BundleManifest {
    pub template: TemplateSection,
    pub metadata: MetadataSection,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    /// The framework this bundle scaffolds; must match the directory it is in.
    pub framework: Framework,
}

/// `[metadata]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl BundleManifest {
    /// Parse a manifest; `origin` names it in errors.
    pub fn parse(raw: &str, origin: &str) -> Result<Self, DomainError> {
        toml::from_str(raw)
            .map_err(|e| DomainError::InvalidTemplate(format!("failed to parse '{origin}': {e}")))
    }

    /// Reject a manifest that claims another framework than the one requested.
    pub fn expect_framework(&self, framework: Framework, origin: &str) -> Result<(), DomainError> {
        if self.template.framework == framework {
            Ok(())
        } else {
            Err(DomainError::InvalidTemplate(format!(
                "'{origin}' declares framework '{}', expected '{framework}'",
                self.template.framework
            )))
        }
    }

    pub fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            name: self.metadata.name.clone(),
            description: self.metadata.description.clone(),
        }
    }
}
