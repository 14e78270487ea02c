//! Runs the `spark` binary against throwaway plugin projects.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>example-plugin</artifactId>
    <version>1.0.0</version>
    <packaging>atlassian-plugin</packaging>
    <dependencies>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>com.atlassian.maven.plugins</groupId>
                <artifactId>{HOST_PLUGIN}</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

const DESCRIPTOR: &str = r#"<atlassian-plugin key="example" name="Example" plugins-version="2">
</atlassian-plugin>
"#;

fn project(host_plugin: &str, packaging: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let pom = POM
        .replace("{HOST_PLUGIN}", host_plugin)
        .replace("atlassian-plugin</packaging>", &format!("{packaging}</packaging>"));
    fs::write(dir.path().join("pom.xml"), pom).unwrap();
    fs::create_dir_all(dir.path().join("src/main/resources")).unwrap();
    fs::write(dir.path().join("src/main/resources/atlassian-plugin.xml"), DESCRIPTOR).unwrap();
    dir
}

fn confluence_project() -> TempDir {
    project("maven-confluence-plugin", "atlassian-plugin")
}

/// `spark` isolated from the developer's config, `.env` and `RUST_LOG`.
fn spark(project_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spark").unwrap();
    cmd.current_dir(project_dir)
        .env("NO_COLOR", "1")
        .env("HOME", project_dir)
        .env("XDG_CONFIG_HOME", project_dir.join(".config"))
        .env_remove("RUST_LOG")
        .arg("--offline")
        .arg("--yes");
    cmd
}

#[test]
fn help_mentions_the_flags() {
    Command::cargo_bin("spark")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--key"))
        .stdout(predicate::str::contains("--variant"))
        .stdout(predicate::str::contains("--offline"));
}

#[test]
fn version_is_printed() {
    Command::cargo_bin("spark")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn admin_app_is_scaffolded() {
    let dir = confluence_project();
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin", "--framework", "react"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to SPARK."))
        .stdout(predicate::str::contains("pom.xml: patched"))
        .stdout(predicate::str::contains("offline mode"))
        .stdout(predicate::str::contains("Set-up of SPA complete."));

    let root = dir.path();
    let pom = fs::read_to_string(root.join("pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>spark-confluence</artifactId>"));
    assert!(root.join("src/main/frontend/my-app/index.html").is_file());
    assert!(root.join("src/main/frontend/package.json").is_file());
    assert!(root.join("src/main/java/com/example/spark/MyAppAction.java").is_file());
}

#[test]
fn project_dir_flag_is_honoured() {
    let dir = confluence_project();
    let elsewhere = tempfile::tempdir().unwrap();
    spark(elsewhere.path())
        .args(["--key", "popup", "--variant", "dialog"])
        .arg("--project-dir")
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("src/main/frontend/popup").is_dir());
}

#[test]
fn same_key_twice_is_refused() {
    let dir = confluence_project();
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin"])
        .assert()
        .success();
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error:"));
}

#[test]
fn second_module_keeps_the_build_descriptor() {
    let dir = confluence_project();
    spark(dir.path())
        .args(["--key", "first", "--variant", "admin"])
        .assert()
        .success();
    let pom = fs::read_to_string(dir.path().join("pom.xml")).unwrap();

    spark(dir.path())
        .args(["--key", "second", "--variant", "dialog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pom.xml: up to date"));
    assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), pom);
}

#[test]
fn missing_build_descriptor_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("pom.xml"));
}

#[test]
fn jar_packaging_is_rejected() {
    let dir = project("maven-confluence-plugin", "jar");
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin"])
        .assert()
        .code(2);
    assert!(!dir.path().join("src/main/frontend").exists());
}

#[test]
fn space_app_on_jira_is_rejected() {
    let dir = project("maven-jira-plugin", "atlassian-plugin");
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "space"])
        .assert()
        .code(2);
}

#[test]
fn yes_without_key_is_a_user_error() {
    let dir = confluence_project();
    spark(dir.path())
        .args(["--variant", "admin"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("key"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let dir = confluence_project();
    spark(dir.path()).args(["-q", "-v"]).assert().code(2);
}

#[test]
fn broken_config_file_is_a_config_error() {
    let dir = confluence_project();
    let config = dir.path().join("spark.toml");
    fs::write(&config, "[defaults]\nframework = \"vue\"\n").unwrap();
    spark(dir.path())
        .args(["--key", "my-app", "--variant", "admin"])
        .arg("--config")
        .arg(&config)
        .assert()
        .code(4);
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = confluence_project();
    spark(dir.path())
        .args(["--key", "my-app", "--config", "does-not-exist.toml"])
        .assert()
        .code(4);
}
