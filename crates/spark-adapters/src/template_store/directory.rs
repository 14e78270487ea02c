//! Bundles read from a local directory, one subdirectory per framework.
//!
//! ```text
//! <root>/
//! ├── angular1/
//! │   ├── template.toml
//! │   ├── module.xml.tmpl
//! │   └── app/...
//! └── react/
//!     └── ...
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use spark_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainError, Framework, RelativePath, TemplateBundle, TemplateFile},
    error::SparkResult,
};

use super::manifest::{BundleManifest, MANIFEST_FILE};

/// Loads bundles from `<root>/<framework>/`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// The directory does not need to exist until a bundle is loaded.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, framework: Framework) -> SparkResult<TemplateBundle> {
        let dir = self.root.join(framework.as_str());
        if !dir.is_dir() {
            return Err(ApplicationError::TemplateNotFound {
                name: framework.to_string(),
                reason: format!("{} is not a directory", dir.display()),
            }
            .into());
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let origin = manifest_path.display().to_string();
        let raw = fs::read_to_string(&manifest_path)
            .map_err(|e| DomainError::InvalidTemplate(format!("failed to read '{origin}': {e}")))?;
        let manifest = BundleManifest::parse(&raw, &origin)?;
        manifest.expect_framework(framework, &origin)?;

        let mut bundle = TemplateBundle::new(framework, manifest.metadata());
        for walk_entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry
                .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
            if !walk_entry.file_type().is_file() {
                continue; // Skip directories and symlinks.
            }

            let rel = walk_entry.path().strip_prefix(&dir).map_err(|_| {
                DomainError::InvalidTemplate(format!(
                    "failed to relativise '{}' against '{}'",
                    walk_entry.path().display(),
                    dir.display()
                ))
            })?;
            if rel == Path::new(MANIFEST_FILE) {
                continue;
            }

            let path = RelativePath::try_new(rel).map_err(|p| {
                DomainError::InvalidTemplate(format!("unusable path '{}'", p.display()))
            })?;
            let contents = fs::read(walk_entry.path()).map_err(|e| {
                DomainError::InvalidTemplate(format!("failed to read '{}': {e}", path))
            })?;
            bundle.push(TemplateFile { path, contents });
        }
        bundle.validate()?;

        debug!(files = bundle.files().len(), dir = %dir.display(), "loaded bundle");
        Ok(bundle)
    }
}
