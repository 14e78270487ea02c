//! Implementation of the `spark` run.
//!
//! Responsibility: pick the adapters, call the core scaffold service, and
//! display results. No business logic lives here.

use std::io::IsTerminal as _;

use tracing::{debug, info, instrument};

use spark_adapters::{
    BuiltinStore, DirectoryStore, JinjaRenderer, LocalFilesystem, MavenCentralLookup,
    OfflineLookup,
};
use spark_core::{
    application::{Prompter, ScaffoldService, TemplateStore, VersionLookup},
    domain::{ChangeKind, ScaffoldReport},
    error::SparkError,
};

use crate::{
    cli::{GlobalArgs, ScaffoldArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::{ArgsPrompter, Presets},
};

/// Execute a scaffold run.
///
/// 1. Check the project directory
/// 2. Build adapters from flags and config
/// 3. Run the `ScaffoldService` (prompts happen inside)
/// 4. Print what changed and the next steps
#[instrument(skip_all, fields(project = %args.project_dir.display()))]
pub fn execute(
    args: &ScaffoldArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    if !args.project_dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("{} is not a directory", args.project_dir.display()),
        });
    }

    let settings = config.scaffold_settings()?;
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        template_store(args, config),
        Box::new(JinjaRenderer::new()),
        version_lookup(args, config)?,
        prompter(args),
    )
    .with_settings(settings);

    output
        .header("Welcome to SPARK.")
        .with_cli_context(|| "writing to the terminal")?;
    info!("Scaffold started");

    let report = service.scaffold(&args.project_dir).map_err(|e| {
        if e.is_cancelled() {
            CliError::Cancelled
        } else {
            CliError::Core(e)
        }
    })?;

    info!(changes = report.changes.len(), "Scaffold completed");
    print_report(&report, output).with_cli_context(|| "writing to the terminal")?;

    if !global.quiet {
        output
            .print("")
            .and_then(|()| output.success("Set-up of SPA complete."))
            .and_then(|()| output.print("  * Run atlas-debug"))
            .with_cli_context(|| "writing to the terminal")?;
    }

    Ok(())
}

fn template_store(args: &ScaffoldArgs, config: &AppConfig) -> Box<dyn TemplateStore> {
    match args.templates.as_ref().or(config.templates.local_path.as_ref()) {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using template bundles from disk");
            Box::new(DirectoryStore::new(dir))
        }
        None => Box::new(BuiltinStore::new()),
    }
}

fn version_lookup(args: &ScaffoldArgs, config: &AppConfig) -> CliResult<Box<dyn VersionLookup>> {
    if args.offline || !config.versions.lookup {
        debug!("Version lookup disabled");
        return Ok(Box::new(OfflineLookup));
    }
    let lookup = MavenCentralLookup::new(&config.versions.lookup_url, config.lookup_timeout())
        .map_err(|e: SparkError| CliError::ConfigError {
            message: e.to_string(),
        })?;
    Ok(Box::new(lookup))
}

/// Interactive unless `--yes` or stdin is not a terminal.
fn prompter(args: &ScaffoldArgs) -> Box<dyn Prompter> {
    let presets = Presets::from(args);
    if args.yes || !std::io::stdin().is_terminal() {
        debug!("Not prompting, answers come from flags and config");
        return Box::new(ArgsPrompter::new(presets));
    }
    interactive_prompter(presets)
}

#[cfg(feature = "interactive")]
fn interactive_prompter(presets: Presets) -> Box<dyn Prompter> {
    Box::new(crate::prompt::DialoguerPrompter::new(presets))
}

#[cfg(not(feature = "interactive"))]
fn interactive_prompter(presets: Presets) -> Box<dyn Prompter> {
    debug!("Built without prompt support");
    Box::new(ArgsPrompter::new(presets))
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> std::io::Result<()> {
    for line in report_lines(report) {
        output.info(&line)?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    Ok(())
}

/// One line per touched file.
fn report_lines(report: &ScaffoldReport) -> Vec<String> {
    report
        .changes
        .iter()
        .map(|change| {
            let path = change.path.display();
            match &change.kind {
                ChangeKind::Patched { applied, .. } if applied.is_empty() => {
                    format!("{path}: up to date")
                }
                ChangeKind::Patched { applied, .. } => {
                    format!("{path}: patched ({})", applied.join(", "))
                }
                ChangeKind::Created => format!("{path}: created"),
                ChangeKind::Merged => format!("{path}: updated"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn report_lines_describe_each_change() {
        let mut report = ScaffoldReport::default();
        report.record(
            "pom.xml",
            ChangeKind::Patched {
                applied: vec!["spark-dependency".into(), "spark-dev-dir".into()],
                skipped: vec![],
            },
        );
        report.record(
            "src/main/resources/atlassian-plugin.xml",
            ChangeKind::Patched {
                applied: vec![],
                skipped: vec!["spark-module".into()],
            },
        );
        report.record(PathBuf::from("src/main/frontend/package.json"), ChangeKind::Merged);
        report.record("src/main/frontend/team/index.html", ChangeKind::Created);

        assert_eq!(
            report_lines(&report),
            vec![
                "pom.xml: patched (spark-dependency, spark-dev-dir)",
                "src/main/resources/atlassian-plugin.xml: up to date",
                "src/main/frontend/package.json: updated",
                "src/main/frontend/team/index.html: created",
            ]
        );
    }

    #[test]
    fn offline_flag_skips_the_network() {
        let args = ScaffoldArgs {
            key: None,
            name: None,
            variant: None,
            framework: None,
            yes: true,
            offline: true,
            templates: None,
            project_dir: PathBuf::from("."),
        };
        let lookup = version_lookup(&args, &AppConfig::default()).unwrap();
        assert!(lookup.latest("spark-confluence").is_err());
    }
}
