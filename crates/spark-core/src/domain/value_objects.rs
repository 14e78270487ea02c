//! Domain value objects: Variant, Framework, HostApplication, ModuleKey.
//!
//! # Design
//!
//! These are pure value types: `Copy` (except [`ModuleKey`]), equality by
//! value, no identity. Each has a stable string form used in templates,
//! prompts and file paths, and a `FromStr` parser that accepts it back.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Variant ──────────────────────────────────────────────────────────────────

/// What kind of SPA module is being scaffolded.
///
/// The variants are mutually exclusive: every predicate below is `true` for
/// exactly one variant, except [`Variant::is_admin_or_space`] which covers two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Admin-console page.
    Admin,
    /// Modal dialog opened from a web item.
    Dialog,
    /// Page integrated into a Confluence space.
    Space,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Self::Admin, Self::Dialog, Self::Space];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Dialog => "dialog",
            Self::Space => "space",
        }
    }

    /// Label shown in the interactive prompt.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin App",
            Self::Dialog => "Dialog App",
            Self::Space => "Space App (Confluence-only)",
        }
    }

    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub const fn is_dialog(&self) -> bool {
        matches!(self, Self::Dialog)
    }

    pub const fn is_space(&self) -> bool {
        matches!(self, Self::Space)
    }

    pub const fn is_admin_or_space(&self) -> bool {
        matches!(self, Self::Admin | Self::Space)
    }

    /// Admin and space apps are served through a host action class.
    pub const fn needs_host_stub(&self) -> bool {
        self.is_admin_or_space()
    }

    /// Whether the host application can serve this variant.
    pub const fn supported_on(&self, host: HostApplication) -> bool {
        match self {
            Self::Space => matches!(host, HostApplication::Confluence),
            Self::Admin | Self::Dialog => true,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "dialog" => Ok(Self::Dialog),
            "space" => Ok(Self::Space),
            other => Err(DomainError::UnknownValue {
                field: "variant",
                value: other.to_string(),
                expected: "admin, dialog, space",
            }),
        }
    }
}

// ── Framework ────────────────────────────────────────────────────────────────

/// Frontend technology of the generated SPA. Selects the template bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Angular1,
    Angular2,
    React,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Self::Angular1, Self::Angular2, Self::React];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Angular1 => "angular1",
            Self::Angular2 => "angular2",
            Self::React => "react",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Angular1 => "AngularJS 1.x",
            Self::Angular2 => "AngularJS 2",
            Self::React => "ReactJS",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "angular1" | "angularjs" => Ok(Self::Angular1),
            "angular2" | "angular" => Ok(Self::Angular2),
            "react" | "reactjs" => Ok(Self::React),
            other => Err(DomainError::UnknownValue {
                field: "framework",
                value: other.to_string(),
                expected: "angular1, angular2, react",
            }),
        }
    }
}

// ── HostApplication ──────────────────────────────────────────────────────────

/// The Atlassian product the plugin is built for, detected from the AMPS
/// build plugin declared in `pom.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostApplication {
    Confluence,
    Jira,
}

impl HostApplication {
    pub const ALL: [HostApplication; 2] = [Self::Confluence, Self::Jira];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confluence => "confluence",
            Self::Jira => "jira",
        }
    }

    /// Build-plugin artifact ids that identify this host.
    pub const fn plugin_artifacts(&self) -> &'static [&'static str] {
        match self {
            Self::Confluence => &["maven-confluence-plugin", "confluence-maven-plugin"],
            Self::Jira => &["maven-jira-plugin", "jira-maven-plugin"],
        }
    }

    /// Artifact id of the SPARK runtime library for this host.
    pub const fn spark_artifact(&self) -> &'static str {
        match self {
            Self::Confluence => "spark-confluence",
            Self::Jira => "spark-jira",
        }
    }

    /// Match a build-plugin artifact id against the supported hosts.
    pub fn from_plugin_artifact(artifact_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|host| {
            host.plugin_artifacts()
                .iter()
                .any(|known| artifact_id.contains(known))
        })
    }

    /// Every artifact id the tool recognises, for error messages.
    pub fn supported_artifacts() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .flat_map(|host| host.plugin_artifacts().iter().copied())
            .collect()
    }
}

impl fmt::Display for HostApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ModuleKey ────────────────────────────────────────────────────────────────

/// Identifier of the generated module: directory name, plugin module key and
/// resource prefix. Alphanumerics, `-` and `_` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidModuleKey {
                key: raw.to_string(),
                reason: "key cannot be empty".into(),
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidModuleKey {
                key: raw.to_string(),
                reason: format!("character '{bad}' is not allowed"),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `my-admin_app` -> `MyAdminApp`; used for generated Java class names.
    pub fn to_pascal_case(&self) -> String {
        self.0
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
