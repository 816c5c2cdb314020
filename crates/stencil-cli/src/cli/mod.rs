//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. No business logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_core::domain::ArtifactCategory;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generation hooks for the Python package template",
    long_about = "Stencil runs the steps around template rendering: input \
                  validation before generation, and docs pruning, virtualenv \
                  creation and setup instructions after it.",
    after_help = "EXAMPLES:\n\
        \x20 stencil validate --project-name my-lib --module-name my_lib\n\
        \x20 stencil bootstrap ./my-lib --project-name my-lib --no-docs --venv\n\
        \x20 stencil clean --skip coverage\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pre-generation hook: validate the template inputs.
    #[command(
        about = "Validate project and module names",
        after_help = "EXAMPLES:\n\
            \x20 stencil validate --project-name my-lib --module-name my_lib"
    )]
    Validate(ValidateArgs),

    /// Post-generation hook: prune, create the environment, print next steps.
    #[command(
        visible_alias = "b",
        about = "Run the post-generation bootstrap",
        after_help = "EXAMPLES:\n\
            \x20 stencil bootstrap ./my-lib --project-name my-lib\n\
            \x20 stencil bootstrap ./my-lib --project-name my-lib --no-docs --strict\n\
            \x20 stencil bootstrap ./my-lib --project-name my-lib --venv --venv-arg=--without-pip"
    )]
    Bootstrap(BootstrapArgs),

    /// Print the setup instructions for an existing project.
    #[command(
        about = "Print setup instructions",
        after_help = "EXAMPLES:\n\
            \x20 stencil instructions ./my-lib --github-username octocat"
    )]
    Instructions(InstructionsArgs),

    /// Remove build and cache artifacts.
    #[command(
        about = "Remove build and cache artifacts",
        after_help = "EXAMPLES:\n\
            \x20 stencil clean                  # root found via tasks.py\n\
            \x20 stencil clean ./my-lib\n\
            \x20 stencil clean --skip tox --skip mypy"
    )]
    Clean(CleanArgs),

    /// Inspect removal manifests.
    #[command(about = "Removal manifest tools", subcommand)]
    Manifest(ManifestCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get bootstrap.interpreter\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// The commands a template generator runs as hooks. Generators only tell
    /// success from failure, so these exit with 0 or 1.
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Validate(_) | Self::Bootstrap(_))
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Human-facing project name; must not contain whitespace.
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: String,

    /// Importable package name.
    #[arg(long = "module-name", value_name = "MODULE")]
    pub module_name: String,
}

// ── shared project identity ───────────────────────────────────────────────────

/// Options that shape the printed instructions.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project root (default: current directory).
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Project name (default: the root directory's name).
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Importable package name, validated when given.
    #[arg(long = "module-name", value_name = "MODULE")]
    pub module_name: Option<String>,

    /// GitHub account for the `git remote add` line.
    #[arg(long = "github-username", value_name = "USER")]
    pub github_username: Option<String>,

    /// Repository name (default: the project name).
    #[arg(long = "github-repo", value_name = "REPO")]
    pub github_repo: Option<String>,
}

// ── bootstrap ─────────────────────────────────────────────────────────────────

/// Arguments for `stencil bootstrap`.
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Keep the docs subtree.
    #[arg(long = "docs", overrides_with = "no_docs")]
    pub docs: bool,

    /// Remove the docs subtree.
    #[arg(long = "no-docs", overrides_with = "docs")]
    pub no_docs: bool,

    /// Create a virtual environment in `venv`.
    #[arg(long = "venv", overrides_with = "no_venv")]
    pub venv: bool,

    /// Do not create a virtual environment.
    #[arg(long = "no-venv", overrides_with = "venv")]
    pub no_venv: bool,

    /// Extra argument for `python -m venv`; repeat for several.
    #[arg(long = "venv-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub venv_args: Vec<String>,

    /// Interpreter used to create the environment.
    #[arg(long = "interpreter", value_name = "PROGRAM")]
    pub interpreter: Option<String>,

    /// Fail when a listed docs path is already missing.
    #[arg(long = "strict")]
    pub strict: bool,

    /// TOML removal manifest to use instead of the built-in docs manifest.
    #[arg(long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

impl BootstrapArgs {
    /// Explicit flag wins; `None` defers to configuration.
    pub fn docs_flag(&self) -> Option<bool> {
        flag_pair(self.docs, self.no_docs)
    }

    pub fn venv_flag(&self) -> Option<bool> {
        flag_pair(self.venv, self.no_venv)
    }
}

fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

// ── instructions ──────────────────────────────────────────────────────────────

/// Arguments for `stencil instructions`.
#[derive(Debug, Args)]
pub struct InstructionsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

// ── clean ─────────────────────────────────────────────────────────────────────

/// Arguments for `stencil clean`.
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Project root (default: nearest ancestor containing the marker file).
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Leave a category alone; repeat for several.
    #[arg(long = "skip", value_name = "CATEGORY", value_enum)]
    pub skip: Vec<CleanCategory>,
}

/// Artifact groups accepted by `--skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CleanCategory {
    Dists,
    Docs,
    Compiled,
    Tox,
    Mypy,
    Coverage,
    Wheelhouse,
    CoverageReport,
    BuildDir,
}

impl From<CleanCategory> for ArtifactCategory {
    fn from(c: CleanCategory) -> Self {
        match c {
            CleanCategory::Dists => Self::Dists,
            CleanCategory::Docs => Self::Docs,
            CleanCategory::Compiled => Self::Compiled,
            CleanCategory::Tox => Self::Tox,
            CleanCategory::Mypy => Self::Mypy,
            CleanCategory::Coverage => Self::Coverage,
            CleanCategory::Wheelhouse => Self::Wheelhouse,
            CleanCategory::CoverageReport => Self::CoverageReport,
            CleanCategory::BuildDir => Self::BuildDir,
        }
    }
}

// ── manifest ──────────────────────────────────────────────────────────────────

/// Subcommands for `stencil manifest`.
#[derive(Debug, Subcommand)]
pub enum ManifestCommands {
    /// Print the effective removal manifest as TOML.
    Show {
        /// Manifest file to load instead of the built-in one.
        #[arg(long = "file", value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `bootstrap.interpreter`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
