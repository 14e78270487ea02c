//! Template bundles: the files one framework contributes to a scaffold run.
//!
//! ## Layout
//!
//! ```text
//! <bundle>/
//! ├── template.toml          metadata (read by the directory store)
//! ├── module.xml.tmpl        fragment for atlassian-plugin.xml
//! ├── package.json.tmpl      fragment merged into src/main/frontend/package.json
//! ├── HostAction.java.tmpl   host-integration stub (admin and space apps)
//! └── app/                   copied into src/main/frontend/<key>/
//! ```
//!
//! Inside `app/`, files ending in [`TEMPLATE_SUFFIX`] are rendered and written
//! without the suffix; everything else is copied byte for byte.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::Framework,
};

pub const TEMPLATE_SUFFIX: &str = ".tmpl";
pub const MODULE_FRAGMENT: &str = "module.xml.tmpl";
pub const MANIFEST_FRAGMENT: &str = "package.json.tmpl";
pub const HOST_STUB: &str = "HostAction.java.tmpl";
pub const APP_TREE: &str = "app";

/// One file of a bundle, addressed relative to the bundle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: RelativePath,
    pub contents: Vec<u8>,
}

impl TemplateFile {
    pub fn new(path: impl Into<RelativePath>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Whether this file goes through the renderer.
    pub fn is_template(&self) -> bool {
        self.path
            .as_path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEMPLATE_SUFFIX) && n.len() > TEMPLATE_SUFFIX.len())
    }

    /// Destination path: the suffix is dropped from template files.
    pub fn output_path(&self) -> RelativePath {
        if !self.is_template() {
            return self.path.clone();
        }
        let raw = self.path.as_str_lossy();
        RelativePath::new(&raw[..raw.len() - TEMPLATE_SUFFIX.len()])
    }

    pub fn as_text(&self) -> Result<&str, DomainError> {
        std::str::from_utf8(&self.contents).map_err(|e| {
            DomainError::InvalidTemplate(format!("'{}' is not valid UTF-8: {e}", self.path))
        })
    }
}

/// Human-facing information about a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
}

/// All template files for one framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBundle {
    pub framework: Framework,
    pub metadata: TemplateMetadata,
    files: Vec<TemplateFile>,
}

impl TemplateBundle {
    pub fn new(framework: Framework, metadata: TemplateMetadata) -> Self {
        Self {
            framework,
            metadata,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, file: TemplateFile) {
        self.files.push(file);
    }

    pub fn with_file(mut self, file: TemplateFile) -> Self {
        self.push(file);
        self
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    /// Look up a file by its bundle-relative path (forward slashes).
    pub fn file(&self, path: &str) -> Option<&TemplateFile> {
        self.files.iter().find(|f| f.path.as_str_lossy() == path)
    }

    /// Text of a reserved template, or an error naming the missing file.
    pub fn required_text(&self, path: &str) -> Result<&str, DomainError> {
        self.file(path)
            .ok_or_else(|| {
                DomainError::InvalidTemplate(format!(
                    "bundle '{}' has no '{path}'",
                    self.framework
                ))
            })?
            .as_text()
    }

    /// Files of the `app/` subtree, with paths relative to `app/`.
    pub fn app_files(&self) -> impl Iterator<Item = TemplateFile> + '_ {
        self.files.iter().filter_map(|f| {
            f.path
                .as_path()
                .strip_prefix(Path::new(APP_TREE))
                .ok()
                .and_then(|rest| RelativePath::try_new(rest).ok())
                .map(|path| TemplateFile {
                    path,
                    contents: f.contents.clone(),
                })
        })
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str_lossy()) {
                return Err(DomainError::InvalidTemplate(format!(
                    "duplicate path '{}' in bundle '{}'",
                    file.path, self.framework
                )));
            }
        }
        for reserved in [MODULE_FRAGMENT, MANIFEST_FRAGMENT] {
            if self.file(reserved).is_none() {
                return Err(DomainError::InvalidTemplate(format!(
                    "bundle '{}' is missing '{reserved}'",
                    self.framework
                )));
            }
        }
        if self.app_files().next().is_none() {
            return Err(DomainError::InvalidTemplate(format!(
                "bundle '{}' has an empty '{APP_TREE}/' tree",
                self.framework
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> TemplateBundle {
        TemplateBundle::new(Framework::React, TemplateMetadata::default())
            .with_file(TemplateFile::new(MODULE_FRAGMENT, "<web-item/>"))
            .with_file(TemplateFile::new(MANIFEST_FRAGMENT, "{}"))
            .with_file(TemplateFile::new("app/index.html.tmpl", "{{ name }}"))
            .with_file(TemplateFile::new("app/img/logo.png", vec![0x89, 0x50]))
    }

    #[test]
    fn suffix_marks_templates() {
        let file = TemplateFile::new("app/index.html.tmpl", "");
        assert!(file.is_template());
        assert_eq!(file.output_path().as_str_lossy(), "app/index.html");

        let plain = TemplateFile::new("app/logo.png", "");
        assert!(!plain.is_template());
        assert_eq!(plain.output_path().as_str_lossy(), "app/logo.png");
    }

    #[test]
    fn bare_suffix_is_not_a_template() {
        assert!(!TemplateFile::new(".tmpl", "").is_template());
    }

    #[test]
    fn app_files_are_rebased() {
        let paths: Vec<_> = bundle().app_files().map(|f| f.path.as_str_lossy()).collect();
        assert_eq!(paths, vec!["index.html.tmpl", "img/logo.png"]);
    }

    #[test]
    fn validate_requires_reserved_files() {
        assert!(bundle().validate().is_ok());

        let missing = TemplateBundle::new(Framework::React, TemplateMetadata::default())
            .with_file(TemplateFile::new("app/index.html", "x"));
        assert!(matches!(missing.validate(), Err(DomainError::InvalidTemplate(_))));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let dup = bundle().with_file(TemplateFile::new("app/img/logo.png", vec![0]));
        assert!(dup.validate().is_err());
    }
}
