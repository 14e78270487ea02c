//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use spark_core::domain::{Framework, Variant};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "spark",
    bin_name = "spark",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Add a SPARK single-page app to an Atlassian plugin",
    long_about = "spark adds a single-page-app module to an existing Atlassian \
                  plugin project: it patches pom.xml and atlassian-plugin.xml, \
                  copies the app template and merges the frontend package.json. \
                  Running it again never duplicates what is already there.",
    after_help = "EXAMPLES:\n\
        \x20 spark\n\
        \x20 spark --key team-admin --name \"Team Admin\" --variant admin --framework react --yes\n\
        \x20 spark -C ../my-plugin --offline\n\
        \x20 spark --templates ./my-templates --framework angular1",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub scaffold: ScaffoldArgs,
}

// ── scaffold options ──────────────────────────────────────────────────────────

/// Answers that can be given up front; anything missing is asked for.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Module key; also the directory under `src/main/frontend`.
    #[arg(
        short = 'k',
        long = "key",
        value_name = "KEY",
        help = "Module key (letters, digits, '-' and '_')"
    )]
    pub key: Option<String>,

    /// Display name. Defaults to the key.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Display name of the app")]
    pub name: Option<String>,

    #[arg(long = "variant", value_name = "TYPE", value_enum, help = "Kind of app")]
    pub variant: Option<VariantArg>,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        value_enum,
        help = "Frontend technology"
    )]
    pub framework: Option<FrameworkArg>,

    /// Skip all prompts; missing answers fall back to configured defaults.
    #[arg(short = 'y', long = "yes", help = "Do not prompt, do not ask for confirmation")]
    pub yes: bool,

    #[arg(long = "offline", help = "Do not look up the latest SPARK version")]
    pub offline: bool,

    /// Directory with one bundle per framework, replacing the built-in ones.
    #[arg(long = "templates", value_name = "DIR", help = "Use template bundles from DIR")]
    pub templates: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Root of the plugin project"
    )]
    pub project_dir: PathBuf,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum VariantArg {
    Admin,
    Dialog,
    /// Confluence only.
    Space,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Admin => Variant::Admin,
            VariantArg::Dialog => Variant::Dialog,
            VariantArg::Space => Variant::Space,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FrameworkArg {
    #[value(alias = "angularjs")]
    Angular1,
    #[value(alias = "angular")]
    Angular2,
    React,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Angular1 => Framework::Angular1,
            FrameworkArg::Angular2 => Framework::Angular2,
            FrameworkArg::React => Framework::React,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
