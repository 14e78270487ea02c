//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate only sees the [`ScaffoldSettings`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SPARK_*` environment variables, e.g. `SPARK_VERSIONS__LOOKUP=false`
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use spark_adapters::version_lookup::{DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT};
use spark_core::application::{DEFAULT_SPARK_VERSION, ScaffoldSettings};
use spark_core::domain::{Framework, Variant};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers offered when the user just presses enter.
    pub defaults: Defaults,
    pub versions: VersionsConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub framework: String,
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Written into the build descriptor when the lookup is off or fails.
    pub spark_fallback: String,
    pub lookup: bool,
    pub lookup_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory with one bundle per framework; built-in bundles when unset.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            framework: Framework::default().to_string(),
            variant: None,
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            spark_fallback: DEFAULT_SPARK_VERSION.to_string(),
            lookup: true,
            lookup_url: DEFAULT_SEARCH_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the platform default may not.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        Self::load_from(&path, required)
            .with_context(|| format!("cannot load configuration from {}", path.display()))
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("SPARK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the default configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "k15t", "spark")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".spark.toml"))
    }

    /// Settings handed to the scaffold service.
    pub fn scaffold_settings(&self) -> CliResult<ScaffoldSettings> {
        let default_framework = self
            .defaults
            .framework
            .parse::<Framework>()
            .map_err(|e| invalid("defaults.framework", e))?;
        let default_variant = self
            .defaults
            .variant
            .as_deref()
            .map(str::parse::<Variant>)
            .transpose()
            .map_err(|e| invalid("defaults.variant", e))?;

        Ok(ScaffoldSettings {
            default_variant,
            default_framework,
            spark_fallback_version: self.versions.spark_fallback.clone(),
        })
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.versions.timeout_secs)
    }
}

fn invalid(key: &str, e: impl std::fmt::Display) -> CliError {
    CliError::ConfigError {
        message: format!("{key}: {e}"),
    }
}
