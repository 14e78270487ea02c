//! Scaffold Service - main application orchestrator.
//!
//! A run is a fixed table of stages over one [`ProjectContext`]. Stages run in
//! order and the first failure ends the run; files patched by earlier stages
//! stay patched, which is safe because every patch rule is idempotent.

use std::path::Path;
use tracing::{debug, info, info_span, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PromptRequest, Prompter, TemplateRenderer, TemplateStore, VersionLookup},
        services::{manifest, patching::run_pipeline, template_copier::copy_tree},
    },
    domain::{
        BUILD_DESCRIPTOR, ChangeKind, DEPENDENCY_MANIFEST, DescriptorFile, DomainError, Framework,
        HOST_STUB, MANIFEST_FRAGMENT, MODULE_FRAGMENT, PLUGIN_DESCRIPTOR, ProjectContext,
        RenderContext, ScaffoldReport, Variant,
    },
    error::{SparkError, SparkResult},
    patch::{Document, Pipeline},
    rules::{ModuleFragment, build_descriptor, plugin_descriptor},
};

/// SPARK version written into `pom.xml` when the lookup is off or fails.
pub const DEFAULT_SPARK_VERSION: &str = "2.4.0";

/// Knobs the CLI fills from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldSettings {
    pub default_variant: Option<Variant>,
    pub default_framework: Framework,
    pub spark_fallback_version: String,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            default_variant: None,
            default_framework: Framework::default(),
            spark_fallback_version: DEFAULT_SPARK_VERSION.to_string(),
        }
    }
}

pub type Stage = fn(&ScaffoldService, &mut ProjectContext) -> SparkResult<()>;

/// The run, in order.
pub const STAGES: &[(&str, Stage)] = &[
    ("load-build-descriptor", ScaffoldService::load_build_descriptor),
    ("load-plugin-descriptor", ScaffoldService::load_plugin_descriptor),
    ("collect-configuration", ScaffoldService::collect_configuration),
    ("resolve-template", ScaffoldService::resolve_template),
    ("patch-build-descriptor", ScaffoldService::patch_build_descriptor),
    ("patch-plugin-descriptor", ScaffoldService::patch_plugin_descriptor),
    ("copy-template", ScaffoldService::copy_template),
    ("generate-host-stub", ScaffoldService::generate_host_stub),
    ("merge-dependency-manifest", ScaffoldService::merge_dependency_manifest),
];

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    versions: Box<dyn VersionLookup>,
    prompter: Box<dyn Prompter>,
    settings: ScaffoldSettings,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        versions: Box<dyn VersionLookup>,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            filesystem,
            store,
            renderer,
            versions,
            prompter,
            settings: ScaffoldSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ScaffoldSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Add a SPA module to the plugin project at `root`.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn scaffold(&self, root: impl AsRef<Path>) -> SparkResult<ScaffoldReport> {
        let mut ctx = ProjectContext::new(root.as_ref());

        for (name, stage) in STAGES {
            let span = info_span!("stage", name = *name);
            let _guard = span.enter();
            debug!("starting");
            if let Err(e) = stage(self, &mut ctx) {
                if !e.is_cancelled() {
                    warn!(error = %e, "stage failed");
                }
                return Err(e);
            }
        }

        info!(
            files = ctx.report.modified().count(),
            "Scaffold completed successfully"
        );
        Ok(ctx.report)
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn load_build_descriptor(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let path = ctx.path(BUILD_DESCRIPTOR);
        let text = self.read_required(&path)?;
        let facts = {
            let doc = Document::parse(&text).map_err(|e| SparkError::patch(&path, e))?;
            build_descriptor::read_facts(&doc)?
        };

        info!(host = %facts.host, group = %facts.group_id, artifact = %facts.artifact_id, "Build descriptor loaded");
        ctx.build_descriptor = Some(DescriptorFile { path, text });
        ctx.build_facts = Some(facts);
        Ok(())
    }

    fn load_plugin_descriptor(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let path = ctx.path(PLUGIN_DESCRIPTOR);
        let text = self.read_required(&path)?;
        Document::parse(&text).map_err(|e| SparkError::patch(&path, e))?;

        ctx.plugin_descriptor = Some(DescriptorFile { path, text });
        Ok(())
    }

    fn collect_configuration(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let facts = ctx.facts()?.clone();
        let request = PromptRequest {
            host: facts.host,
            default_variant: self
                .settings
                .default_variant
                .filter(|v| v.supported_on(facts.host)),
            default_framework: self.settings.default_framework,
        };

        let answers = self.prompter.collect(&request)?;
        if !answers.variant.supported_on(facts.host) {
            return Err(DomainError::UnsupportedVariantForHost {
                variant: answers.variant.to_string(),
                host: facts.host.to_string(),
            }
            .into());
        }

        let version = match self.versions.latest(facts.host.spark_artifact()) {
            Ok(version) => version,
            Err(e) => {
                let fallback = self.settings.spark_fallback_version.clone();
                warn!(error = %e, %fallback, "Version lookup failed, using fallback");
                ctx.report.warn(format!(
                    "could not look up the latest SPARK version ({e}); using {fallback}"
                ));
                fallback
            }
        };

        let render = RenderContext::new(answers, &facts, version);
        let module_dir = ctx.path(&render.module_dir);
        if self.filesystem.exists(&module_dir) {
            return Err(ApplicationError::DuplicateTarget {
                key: render.key.to_string(),
                path: ctx.relative(&module_dir),
            }
            .into());
        }

        info!(key = %render.key, variant = %render.variant, framework = %render.framework, version = %render.spark_version, "Configuration collected");
        ctx.render = Some(render);
        Ok(())
    }

    fn resolve_template(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let framework = ctx.render_context()?.framework;
        let bundle = self.store.load(framework)?;
        bundle.validate()?;

        info!(template = %bundle.metadata.name, files = bundle.files().len(), "Template resolved");
        ctx.template = Some(bundle);
        Ok(())
    }

    fn patch_build_descriptor(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let path = ctx.build_descriptor()?.path.clone();
        let pipeline = Pipeline::new(build_descriptor::rules(&ctx.facts()?.host_plugin));
        let outcome = run_pipeline(
            self.filesystem.as_ref(),
            &path,
            &pipeline,
            ctx.render_context()?,
        )?;

        let relative = ctx.relative(&path);
        ctx.report.record(
            relative,
            ChangeKind::Patched {
                applied: outcome.applied,
                skipped: outcome.skipped,
            },
        );
        Ok(())
    }

    fn patch_plugin_descriptor(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let path = ctx.plugin_descriptor()?.path.clone();
        let render = ctx.render_context()?;
        let source = ctx.template()?.required_text(MODULE_FRAGMENT)?;
        let fragment = ModuleFragment {
            key: render.key.clone(),
            xml: self.renderer.render(MODULE_FRAGMENT, source, render)?,
        };

        let pipeline = Pipeline::new(plugin_descriptor::rules(&fragment.key));
        let outcome = run_pipeline(self.filesystem.as_ref(), &path, &pipeline, &fragment)?;

        let relative = ctx.relative(&path);
        ctx.report.record(
            relative,
            ChangeKind::Patched {
                applied: outcome.applied,
                skipped: outcome.skipped,
            },
        );
        Ok(())
    }

    fn copy_template(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let render = ctx.render_context()?;
        let destination = ctx.path(&render.module_dir);
        let written = copy_tree(
            self.filesystem.as_ref(),
            self.renderer.as_ref(),
            ctx.template()?.app_files(),
            render,
            &destination,
        )?;

        for path in written {
            let relative = ctx.relative(&path);
            ctx.report.record(relative, ChangeKind::Created);
        }
        Ok(())
    }

    fn generate_host_stub(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let render = ctx.render_context()?;
        if !render.variant.needs_host_stub() {
            debug!(variant = %render.variant, "No host stub for this variant");
            return Ok(());
        }

        let path = ctx.path(render.host_stub_path());
        if self.filesystem.exists(&path) {
            let relative = ctx.relative(&path);
            warn!(path = %relative.display(), "Host stub exists, leaving it alone");
            ctx.report
                .warn(format!("{} already exists and was not overwritten", relative.display()));
            return Ok(());
        }

        let source = ctx.template()?.required_text(HOST_STUB)?;
        let text = self.renderer.render(HOST_STUB, source, render)?;
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, text.as_bytes())?;

        let relative = ctx.relative(&path);
        ctx.report.record(relative, ChangeKind::Created);
        Ok(())
    }

    fn merge_dependency_manifest(&self, ctx: &mut ProjectContext) -> SparkResult<()> {
        let render = ctx.render_context()?;
        let source = ctx.template()?.required_text(MANIFEST_FRAGMENT)?;
        let fragment = self.renderer.render(MANIFEST_FRAGMENT, source, render)?;

        let path = ctx.path(DEPENDENCY_MANIFEST);
        let existing = if self.filesystem.exists(&path) {
            Some(self.filesystem.read_to_string(&path)?)
        } else {
            None
        };
        let text =
            manifest::merge_manifest(&ctx.relative(&path), existing.as_deref(), &fragment, render)?;

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, text.as_bytes())?;

        let kind = if existing.is_some() {
            ChangeKind::Merged
        } else {
            ChangeKind::Created
        };
        let relative = ctx.relative(&path);
        ctx.report.record(relative, kind);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn read_required(&self, path: &Path) -> SparkResult<String> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.filesystem.read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::application::{
        ports::{MockPrompter, MockVersionLookup},
        services::test_support::{FakeFilesystem, SubstitutingRenderer, StaticStore, plugin_project},
    };
    use crate::domain::{ModuleKey, ScaffoldAnswers};

    fn answers(variant: Variant) -> ScaffoldAnswers {
        ScaffoldAnswers {
            key: ModuleKey::parse("team-admin").unwrap(),
            name: "Team Admin".into(),
            variant,
            framework: Framework::React,
        }
    }

    fn prompter(variant: Variant) -> Box<MockPrompter> {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_collect()
            .returning(move |_| Ok(answers(variant)));
        Box::new(prompter)
    }

    fn versions(result: SparkResult<String>) -> Box<MockVersionLookup> {
        let mut versions = MockVersionLookup::new();
        versions
            .expect_latest()
            .times(1)
            .return_once(move |_| result);
        Box::new(versions)
    }

    fn service(fs: &FakeFilesystem, variant: Variant, version: SparkResult<String>) -> ScaffoldService {
        ScaffoldService::new(
            Box::new(fs.clone()),
            Box::new(StaticStore),
            Box::new(SubstitutingRenderer),
            versions(version),
            prompter(variant),
        )
    }

    #[test]
    fn stage_table_order() {
        let names: Vec<&str> = STAGES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "load-build-descriptor",
                "load-plugin-descriptor",
                "collect-configuration",
                "resolve-template",
                "patch-build-descriptor",
                "patch-plugin-descriptor",
                "copy-template",
                "generate-host-stub",
                "merge-dependency-manifest",
            ]
        );
    }

    #[test]
    fn full_run_touches_every_file() {
        let fs = plugin_project();
        let report = service(&fs, Variant::Admin, Ok("3.0.0".into()))
            .scaffold("/work")
            .unwrap();

        let pom = fs.text("/work/pom.xml");
        assert!(pom.contains("<version>3.0.0</version>"));
        let descriptor = fs.text("/work/src/main/resources/atlassian-plugin.xml");
        assert!(descriptor.contains("key=\"team-admin-resources\""));
        assert_eq!(fs.text("/work/src/main/frontend/team-admin/index.html"), "<h1>app</h1>\n");
        assert!(fs.exists(Path::new("/work/src/main/java/com/example/spark/TeamAdminAction.java")));
        assert!(fs.text("/work/src/main/frontend/package.json").ends_with("}\n"));

        let paths: Vec<String> = report
            .changes
            .iter()
            .map(|c| c.path.display().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "pom.xml",
                "src/main/resources/atlassian-plugin.xml",
                "src/main/frontend/team-admin/index.html",
                "src/main/java/com/example/spark/TeamAdminAction.java",
                "src/main/frontend/package.json",
            ]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn dialog_gets_no_host_stub() {
        let fs = plugin_project();
        service(&fs, Variant::Dialog, Ok("3.0.0".into()))
            .scaffold("/work")
            .unwrap();
        assert!(!fs.exists(Path::new("/work/src/main/java")));
    }

    #[test]
    fn version_lookup_failure_is_a_warning() {
        let fs = plugin_project();
        let report = service(
            &fs,
            Variant::Dialog,
            Err(SparkError::Internal {
                message: "offline".into(),
            }),
        )
        .scaffold("/work")
        .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(fs.text("/work/pom.xml").contains(&format!("<version>{DEFAULT_SPARK_VERSION}</version>")));
    }

    #[test]
    fn missing_build_descriptor_stops_before_prompting() {
        let fs = FakeFilesystem::default();
        let mut prompter = MockPrompter::new();
        prompter.expect_collect().never();
        let mut versions = MockVersionLookup::new();
        versions.expect_latest().never();

        let err = ScaffoldService::new(
            Box::new(fs),
            Box::new(StaticStore),
            Box::new(SubstitutingRenderer),
            Box::new(versions),
            Box::new(prompter),
        )
        .scaffold("/work")
        .unwrap_err();

        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::MissingFile { .. })
        ));
    }

    #[test]
    fn existing_module_directory_is_a_duplicate() {
        let fs = plugin_project();
        fs.create_dir_all(Path::new("/work/src/main/frontend/team-admin")).unwrap();
        let before = fs.text("/work/pom.xml");

        let err = service(&fs, Variant::Admin, Ok("3.0.0".into()))
            .scaffold("/work")
            .unwrap_err();

        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::DuplicateTarget { .. })
        ));
        assert_eq!(fs.text("/work/pom.xml"), before);
    }

    #[test]
    fn space_on_jira_is_rejected() {
        let fs = plugin_project();
        let pom = fs.text("/work/pom.xml").replace("maven-confluence-plugin", "maven-jira-plugin");
        fs.write_file(Path::new("/work/pom.xml"), pom.as_bytes()).unwrap();

        let mut versions = MockVersionLookup::new();
        versions.expect_latest().never();
        let err = ScaffoldService::new(
            Box::new(fs.clone()),
            Box::new(StaticStore),
            Box::new(SubstitutingRenderer),
            Box::new(versions),
            prompter(Variant::Space),
        )
        .scaffold("/work")
        .unwrap_err();

        assert!(matches!(
            err,
            SparkError::Domain(DomainError::UnsupportedVariantForHost { .. })
        ));
    }

    #[test]
    fn prompter_sees_host_and_filtered_default() {
        let fs = plugin_project();
        let pom = fs.text("/work/pom.xml").replace("maven-confluence-plugin", "maven-jira-plugin");
        fs.write_file(Path::new("/work/pom.xml"), pom.as_bytes()).unwrap();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_collect()
            .withf(|request| {
                request.host == crate::domain::HostApplication::Jira
                    && request.default_variant.is_none()
                    && !request.variants().contains(&Variant::Space)
            })
            .returning(|_| Err(ApplicationError::Cancelled.into()));

        let err = ScaffoldService::new(
            Box::new(fs),
            Box::new(StaticStore),
            Box::new(SubstitutingRenderer),
            Box::new(MockVersionLookup::new()),
            Box::new(prompter),
        )
        .with_settings(ScaffoldSettings {
            default_variant: Some(Variant::Space),
            ..ScaffoldSettings::default()
        })
        .scaffold("/work")
        .unwrap_err();

        assert!(err.is_cancelled());
    }

    #[test]
    fn rerun_with_another_key_leaves_build_descriptor_alone() {
        let fs = plugin_project();
        service(&fs, Variant::Dialog, Ok("3.0.0".into()))
            .scaffold("/work")
            .unwrap();
        let pom = fs.text("/work/pom.xml");

        let mut prompter = MockPrompter::new();
        prompter.expect_collect().returning(|_| {
            Ok(ScaffoldAnswers {
                key: ModuleKey::parse("second").unwrap(),
                name: "Second".into(),
                variant: Variant::Dialog,
                framework: Framework::React,
            })
        });
        let report = ScaffoldService::new(
            Box::new(fs.clone()),
            Box::new(StaticStore),
            Box::new(SubstitutingRenderer),
            versions(Ok("3.0.0".into())),
            Box::new(prompter),
        )
        .scaffold("/work")
        .unwrap();

        assert_eq!(fs.text("/work/pom.xml"), pom);
        assert!(matches!(
            &report.changes[0].kind,
            ChangeKind::Patched { applied, .. } if applied.is_empty()
        ));
        assert!(matches!(report.changes.last().map(|c| &c.kind), Some(ChangeKind::Merged)));
    }
}
