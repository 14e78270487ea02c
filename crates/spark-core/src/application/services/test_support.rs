//! In-crate fakes for service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        Framework, HOST_STUB, MANIFEST_FRAGMENT, MODULE_FRAGMENT, RenderContext, TemplateBundle,
        TemplateFile, TemplateMetadata,
    },
    error::SparkResult,
};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

/// Shared in-memory tree; clones see the same files.
#[derive(Debug, Clone, Default)]
pub struct FakeFilesystem {
    state: Arc<Mutex<State>>,
}

impl FakeFilesystem {
    pub fn with_file(self, path: &str, text: &str) -> Self {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.write_file(path, text.as_bytes()).unwrap();
        self
    }

    pub fn text(&self, path: &str) -> String {
        self.read_to_string(Path::new(path)).unwrap()
    }
}

impl Filesystem for FakeFilesystem {
    fn read_to_string(&self, path: &Path) -> SparkResult<String> {
        let state = self.state.lock().unwrap();
        let bytes = state
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::filesystem(path, "no such file"))?;
        Ok(String::from_utf8(bytes.clone()).unwrap())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> SparkResult<()> {
        let mut state = self.state.lock().unwrap();
        state.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> SparkResult<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }
}

/// Replaces `{{ key }}` and `{{ name }}`; enough for fixtures without logic.
pub struct SubstitutingRenderer;

impl TemplateRenderer for SubstitutingRenderer {
    fn render(&self, _name: &str, source: &str, context: &RenderContext) -> SparkResult<String> {
        Ok(source
            .replace("{{ key }}", context.key.as_str())
            .replace("{{ name }}", &context.name))
    }
}

/// Same small bundle for every framework.
pub struct StaticStore;

impl TemplateStore for StaticStore {
    fn load(&self, framework: Framework) -> SparkResult<TemplateBundle> {
        let metadata = TemplateMetadata {
            name: framework.to_string(),
            description: "fixture".into(),
        };
        Ok(TemplateBundle::new(framework, metadata)
            .with_file(TemplateFile::new(
                MODULE_FRAGMENT,
                "<web-resource key=\"{{ key }}-resources\"/>\n",
            ))
            .with_file(TemplateFile::new(
                MANIFEST_FRAGMENT,
                "{\"scripts\": {\"build:{{ key }}\": \"true\"}}\n",
            ))
            .with_file(TemplateFile::new(HOST_STUB, "class Stub {}\n"))
            .with_file(TemplateFile::new("app/index.html.tmpl", "<h1>app</h1>\n")))
    }
}

pub const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <groupId>com.example</groupId>
    <artifactId>my-plugin</artifactId>
    <packaging>atlassian-plugin</packaging>
    <dependencies>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>com.atlassian.maven.plugins</groupId>
                <artifactId>maven-confluence-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

pub const DESCRIPTOR: &str = "<atlassian-plugin key=\"k\" name=\"n\" plugins-version=\"2\">\n</atlassian-plugin>\n";

/// A plugin project rooted at `/work`.
pub fn plugin_project() -> FakeFilesystem {
    FakeFilesystem::default()
        .with_file("/work/pom.xml", POM)
        .with_file("/work/src/main/resources/atlassian-plugin.xml", DESCRIPTOR)
}
