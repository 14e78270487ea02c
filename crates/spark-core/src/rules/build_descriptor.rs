//! Patch rules for `pom.xml`.
//!
//! Rules run in order; the executions rules rely on the marker comment the
//! frontend plugin rule leaves inside its `<executions>` block. Indentation
//! literals assume the conventional four-space Maven layout.

use crate::domain::{BuildFacts, DomainError, HostApplication, RenderContext};
use crate::patch::{Document, Locator, PatchRule, Strategy, StructuralPath};

pub const REQUIRED_PACKAGING: &str = "atlassian-plugin";
pub const SPARK_GROUP_ID: &str = "com.k15t.spark";
pub const SPARK_REPOSITORY_ID: &str = "k15t";
pub const SPARK_REPOSITORY_URL: &str = "https://nexus.k15t.com/content/repositories/releases";
pub const DEV_DIR_PROPERTY: &str = "spark.dev.dir";
pub const FRONTEND_PLUGIN: &str = "frontend-maven-plugin";
pub const FRONTEND_PLUGIN_VERSION: &str = "1.15.0";
pub const NODE_VERSION: &str = "v20.11.1";

/// Comment inside the frontend plugin's `<executions>`; execution entries
/// are inserted in front of it.
pub const EXECUTIONS_MARKER: &str = "spark-scaffold:executions";

const L2: &str = "        ";
const L3: &str = "            ";
const L4: &str = "                ";
const L5: &str = "                    ";
const L6: &str = "                        ";

fn project() -> StructuralPath {
    StructuralPath::new().child("project")
}

fn plugins() -> StructuralPath {
    project().child("build").child("plugins")
}

fn plugin(artifact: &str) -> StructuralPath {
    plugins()
        .child("plugin")
        .has(StructuralPath::new().child("artifactId").text_contains(artifact))
}

/// Read what later stages need from an unmodified `pom.xml`.
///
/// Packaging defaults to `jar` as in Maven, which is then rejected. The
/// group id falls back to the parent's.
pub fn read_facts(doc: &Document<'_>) -> Result<BuildFacts, DomainError> {
    let text = |path: StructuralPath| doc.text_of(&path).filter(|t| !t.is_empty());

    let packaging = text(project().child("packaging")).unwrap_or_else(|| "jar".to_string());
    if packaging != REQUIRED_PACKAGING {
        return Err(DomainError::UnsupportedPackaging { found: packaging });
    }

    let artifacts: Vec<String> = doc
        .resolve(&plugins().child("plugin").child("artifactId"))
        .iter()
        .map(|m| m.text().trim().to_string())
        .collect();
    let (host, host_plugin) = artifacts
        .iter()
        .find_map(|a| HostApplication::from_plugin_artifact(a).map(|h| (h, a.clone())))
        .ok_or_else(|| DomainError::UnsupportedHostApplication {
            found: artifacts.clone(),
        })?;

    let group_id = text(project().child("groupId"))
        .or_else(|| text(project().child("parent").child("groupId")))
        .ok_or(DomainError::MissingRequiredField { field: "groupId" })?;
    let artifact_id = text(project().child("artifactId"))
        .ok_or(DomainError::MissingRequiredField { field: "artifactId" })?;

    Ok(BuildFacts {
        packaging,
        group_id,
        artifact_id,
        host,
        host_plugin,
    })
}

/// Every rule for the build descriptor, in application order.
///
/// `host_plugin` is the artifact id of the AMPS plugin the host was detected
/// from; the dev-dir property goes into its configuration.
pub fn rules(host_plugin: &str) -> Vec<PatchRule<RenderContext>> {
    vec![
        repository(),
        dependency(),
        dev_dir_property(host_plugin),
        frontend_plugin(host_plugin),
        execution("install-node-and-npm", install_node_fragment),
        execution("npm-install", npm_install_fragment),
        execution("npm-run-build", npm_build_fragment),
    ]
}

fn repository() -> PatchRule<RenderContext> {
    let repositories = project().child("repositories");
    let entry = || {
        format!(
            "<repository>\n    <id>{SPARK_REPOSITORY_ID}</id>\n    <url>{SPARK_REPOSITORY_URL}</url>\n</repository>"
        )
    };
    let block = move |_: &RenderContext| format!("<repositories>\n{}\n</repositories>", indent(&entry(), 1));

    PatchRule::new("spark-repository")
        .applied_when_exists(
            repositories
                .clone()
                .child("repository")
                .has(StructuralPath::new().child("url").text_contains(SPARK_REPOSITORY_URL)),
        )
        .strategy(Strategy::before(
            Locator::closing_tag(repositories.clone()),
            L2,
            move |_: &RenderContext| entry(),
        ))
        .strategy(Strategy::replace(Locator::self_closing(repositories), "    ", block))
        .strategy(Strategy::before(
            Locator::element(project().child("dependencies")),
            "    ",
            block,
        ))
        .strategy(Strategy::before(Locator::closing_tag(project()), "    ", block))
}

fn dependency_fragment(ctx: &RenderContext) -> String {
    format!(
        "<dependency>\n    <groupId>{SPARK_GROUP_ID}</groupId>\n    <artifactId>{}</artifactId>\n    <version>{}</version>\n</dependency>",
        ctx.spark_artifact, ctx.spark_version
    )
}

fn dependency() -> PatchRule<RenderContext> {
    let dependencies = project().child("dependencies");
    let block = |ctx: &RenderContext| {
        format!(
            "<dependencies>\n{}\n</dependencies>",
            indent(&dependency_fragment(ctx), 1)
        )
    };

    PatchRule::new("spark-dependency")
        .applied_when_exists(
            dependencies
                .clone()
                .child("dependency")
                .has(StructuralPath::new().child("groupId").text_contains(SPARK_GROUP_ID)),
        )
        .strategy(Strategy::before(
            Locator::element(dependencies.clone().child("dependency")),
            L2,
            dependency_fragment,
        ))
        .strategy(Strategy::before(
            Locator::closing_tag(dependencies.clone()),
            L2,
            dependency_fragment,
        ))
        .strategy(Strategy::replace(Locator::self_closing(dependencies), "    ", block))
        .strategy(Strategy::before(
            Locator::element(project().child("build")),
            "    ",
            block,
        ))
        .strategy(Strategy::before(Locator::closing_tag(project()), "    ", block))
}

fn dev_dir_property(host_plugin: &str) -> PatchRule<RenderContext> {
    let host = plugin(host_plugin);
    let configuration = host.clone().child("configuration");
    let variables = configuration.clone().child("systemPropertyVariables");

    let property =
        |ctx: &RenderContext| format!("<{DEV_DIR_PROPERTY}>${{project.basedir}}/{}</{DEV_DIR_PROPERTY}>", ctx.frontend_dir);
    let variables_block = move |ctx: &RenderContext| {
        format!(
            "<systemPropertyVariables>\n{}\n</systemPropertyVariables>",
            indent(&property(ctx), 1)
        )
    };
    let configuration_block = move |ctx: &RenderContext| {
        format!(
            "<configuration>\n{}\n</configuration>",
            indent(&variables_block(ctx), 1)
        )
    };

    PatchRule::new("spark-dev-dir")
        .applied_when_exists(variables.clone().child(DEV_DIR_PROPERTY))
        .strategy(Strategy::before(Locator::closing_tag(variables.clone()), L6, property))
        .strategy(Strategy::replace(
            Locator::self_closing(variables),
            L5,
            variables_block,
        ))
        .strategy(Strategy::before(
            Locator::closing_tag(configuration.clone()),
            L5,
            variables_block,
        ))
        .strategy(Strategy::replace(
            Locator::self_closing(configuration),
            L4,
            configuration_block,
        ))
        .strategy(Strategy::before(Locator::closing_tag(host), L4, configuration_block))
}

fn frontend_plugin(host_plugin: &str) -> PatchRule<RenderContext> {
    let block = |ctx: &RenderContext| {
        format!(
            "<plugin>
    <groupId>com.github.eirslett</groupId>
    <artifactId>{FRONTEND_PLUGIN}</artifactId>
    <version>{FRONTEND_PLUGIN_VERSION}</version>
    <configuration>
        <workingDirectory>{}</workingDirectory>
        <installDirectory>target</installDirectory>
    </configuration>
    <executions>
        <!-- {EXECUTIONS_MARKER} -->
    </executions>
</plugin>",
            ctx.frontend_dir
        )
    };

    PatchRule::new("frontend-plugin")
        .applied_when_exists(plugin(FRONTEND_PLUGIN))
        .strategy(Strategy::after(Locator::element(plugin(host_plugin)), L3, block))
        .strategy(Strategy::before(Locator::closing_tag(plugins()), L3, block))
}

fn execution(id: &'static str, fragment: fn() -> String) -> PatchRule<RenderContext> {
    let frontend = plugin(FRONTEND_PLUGIN);
    let executions = frontend.clone().child("executions");
    let marker = executions.clone().comment().text_contains(EXECUTIONS_MARKER);
    let block = move |_: &RenderContext| format!("<executions>\n{}\n</executions>", indent(&fragment(), 1));

    PatchRule::new(format!("frontend-{id}"))
        .applied_when_exists(
            executions
                .clone()
                .child("execution")
                .has(StructuralPath::new().child("id").text_contains(id)),
        )
        .strategy(Strategy::before(Locator::element(marker), L5, move |_: &RenderContext| {
            fragment()
        }))
        .strategy(Strategy::before(
            Locator::closing_tag(executions.clone()),
            L5,
            move |_: &RenderContext| fragment(),
        ))
        .strategy(Strategy::replace(Locator::self_closing(executions), L4, block))
        .strategy(Strategy::before(Locator::closing_tag(frontend), L4, block))
}

fn install_node_fragment() -> String {
    format!(
        "<execution>
    <id>install-node-and-npm</id>
    <goals>
        <goal>install-node-and-npm</goal>
    </goals>
    <configuration>
        <nodeVersion>{NODE_VERSION}</nodeVersion>
    </configuration>
</execution>"
    )
}

fn npm_install_fragment() -> String {
    "<execution>
    <id>npm-install</id>
    <goals>
        <goal>npm</goal>
    </goals>
    <configuration>
        <arguments>install</arguments>
    </configuration>
</execution>"
        .to_string()
}

fn npm_build_fragment() -> String {
    "<execution>
    <id>npm-run-build</id>
    <phase>generate-resources</phase>
    <goals>
        <goal>npm</goal>
    </goals>
    <configuration>
        <arguments>run build</arguments>
    </configuration>
</execution>"
        .to_string()
}

/// Indent every non-empty line by `levels` steps of four spaces.
fn indent(text: &str, levels: usize) -> String {
    let pad = "    ".repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
