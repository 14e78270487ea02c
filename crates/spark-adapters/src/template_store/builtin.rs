//! Bundles compiled into the binary from `templates/`.

use tracing::{debug, instrument};

use spark_core::{
    application::ports::TemplateStore,
    domain::{Framework, TemplateBundle, TemplateFile},
    error::SparkResult,
};

use super::manifest::BundleManifest;

struct EmbeddedBundle {
    manifest: &'static str,
    files: &'static [(&'static str, &'static [u8])],
}

macro_rules! embedded_bundle {
    ($framework:literal: $($path:literal),+ $(,)?) => {
        EmbeddedBundle {
            manifest: include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"), "/templates/", $framework, "/template.toml"
            )),
            files: &[$((
                $path,
                include_bytes!(concat!(
                    env!("CARGO_MANIFEST_DIR"), "/templates/", $framework, "/", $path
                )) as &'static [u8],
            )),+],
        }
    };
}

static ANGULAR1: EmbeddedBundle = embedded_bundle!("angular1":
    "module.xml.tmpl",
    "package.json.tmpl",
    "HostAction.java.tmpl",
    "app/index.html.tmpl",
    "app/app.js.tmpl",
);

static ANGULAR2: EmbeddedBundle = embedded_bundle!("angular2":
    "module.xml.tmpl",
    "package.json.tmpl",
    "HostAction.java.tmpl",
    "app/index.html.tmpl",
    "app/src/main.ts.tmpl",
    "app/tsconfig.json",
    "app/webpack.config.js",
);

static REACT: EmbeddedBundle = embedded_bundle!("react":
    "module.xml.tmpl",
    "package.json.tmpl",
    "HostAction.java.tmpl",
    "app/index.html.tmpl",
    "app/src/index.js.tmpl",
    "app/src/App.js.tmpl",
    "app/webpack.config.js",
    "app/.babelrc",
);

/// The bundles shipped with spark.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStore;

impl BuiltinStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for BuiltinStore {
    #[instrument(skip(self))]
    fn load(&self, framework: Framework) -> SparkResult<TemplateBundle> {
        let embedded = match framework {
            Framework::Angular1 => &ANGULAR1,
            Framework::Angular2 => &ANGULAR2,
            Framework::React => &REACT,
        };
        let origin = format!("builtin:{framework}/template.toml");
        let manifest = BundleManifest::parse(embedded.manifest, &origin)?;
        manifest.expect_framework(framework, &origin)?;

        let mut bundle = TemplateBundle::new(framework, manifest.metadata());
        for (path, contents) in embedded.files {
            bundle.push(TemplateFile::new(*path, *contents));
        }
        bundle.validate()?;

        debug!(files = bundle.files().len(), "loaded builtin bundle");
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::domain::{HOST_STUB, MANIFEST_FRAGMENT, MODULE_FRAGMENT};

    #[test]
    fn every_framework_has_a_valid_bundle() {
        for framework in Framework::ALL {
            let bundle = BuiltinStore::new().load(framework).unwrap();
            assert_eq!(bundle.framework, framework);
            for reserved in [MODULE_FRAGMENT, MANIFEST_FRAGMENT, HOST_STUB] {
                assert!(bundle.file(reserved).is_some(), "{framework}: {reserved}");
            }
            assert!(bundle.app_files().any(|f| f.is_template()));
        }
    }

    #[test]
    fn metadata_comes_from_the_manifest() {
        let bundle = BuiltinStore::new().load(Framework::React).unwrap();
        assert_eq!(bundle.metadata.name, "ReactJS");
    }

    #[test]
    fn non_template_files_are_kept_verbatim() {
        let bundle = BuiltinStore::new().load(Framework::React).unwrap();
        let babelrc = bundle.file("app/.babelrc").unwrap();
        assert!(!babelrc.is_template());
        assert!(babelrc.as_text().unwrap().contains("@babel/preset-react"));
    }
}
