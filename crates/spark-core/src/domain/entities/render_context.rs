//! The rendering context: every value a template or patch fragment may use.

use serde::Serialize;

use crate::domain::{
    entities::project_context::BuildFacts,
    value_objects::{Framework, HostApplication, ModuleKey, Variant},
};

/// Root of every frontend module inside the host project.
pub const FRONTEND_DIR: &str = "src/main/frontend";

/// Answers collected from the user, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldAnswers {
    pub key: ModuleKey,
    pub name: String,
    pub variant: Variant,
    pub framework: Framework,
}

/// Scaffolding configuration shared by reference across every render call of
/// one run. Field names are the variable names visible to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub key: ModuleKey,
    pub name: String,
    pub variant: Variant,
    pub framework: Framework,
    pub host: HostApplication,
    pub spark_artifact: &'static str,
    pub spark_version: String,
    pub group_id: String,
    pub artifact_id: String,
    /// Java package of generated host-integration classes.
    pub package: String,
    pub class_name: String,
    pub frontend_dir: &'static str,
    pub module_dir: String,
}

impl RenderContext {
    pub fn new(answers: ScaffoldAnswers, facts: &BuildFacts, spark_version: String) -> Self {
        let package = java_package(&facts.group_id);
        let class_name = java_class_name(&answers.key);
        let module_dir = format!("{FRONTEND_DIR}/{}", answers.key);

        Self {
            key: answers.key,
            name: answers.name,
            variant: answers.variant,
            framework: answers.framework,
            host: facts.host,
            spark_artifact: facts.host.spark_artifact(),
            spark_version,
            group_id: facts.group_id.clone(),
            artifact_id: facts.artifact_id.clone(),
            package,
            class_name,
            frontend_dir: FRONTEND_DIR,
            module_dir,
        }
    }

    /// `src/main/java/com/example/spark/MyAppAction.java`
    pub fn host_stub_path(&self) -> String {
        format!(
            "src/main/java/{}/{}.java",
            self.package.replace('.', "/"),
            self.class_name
        )
    }
}

/// `2fa` -> `_2faAction`; Java identifiers cannot start with a digit.
fn java_class_name(key: &ModuleKey) -> String {
    let name = format!("{}Action", key.to_pascal_case());
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Derive a legal Java package from a Maven group id.
fn java_package(group_id: &str) -> String {
    let mut segments: Vec<String> = group_id
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let cleaned: String = s
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
                .collect();
            if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
                format!("_{cleaned}")
            } else {
                cleaned
            }
        })
        .collect();
    segments.push("spark".into());
    segments.join(".")
}
