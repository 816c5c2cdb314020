//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STENCIL_` environment variables, `__` between sections
//!    (`STENCIL_BOOTSTRAP__INTERPRETER=python3.12`)
//! 3. Config file (`--config`, else the platform config dir when present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use stencil_adapters::SystemInterpreter;
use stencil_core::application::DEFAULT_ROOT_MARKER;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub bootstrap: BootstrapConfig,
    pub github: GithubConfig,
    pub output: OutputConfig,
    pub clean: CleanConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Keep the docs subtree unless `--no-docs` is passed.
    pub create_docs: bool,
    pub create_venv: bool,
    // An empty list leaves no key behind in the layered source.
    #[serde(default)]
    pub venv_args: Vec<String>,
    pub strict: bool,
    pub interpreter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubConfig {
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// File that identifies the project root.
    pub marker: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapConfig {
                create_docs: true,
                create_venv: false,
                venv_args: Vec::new(),
                strict: false,
                interpreter: SystemInterpreter::DEFAULT_PROGRAM.into(),
            },
            github: GithubConfig { username: None },
            output: OutputConfig { no_color: false },
            clean: CleanConfig {
                marker: DEFAULT_ROOT_MARKER.into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => match Self::config_path() {
                Some(path) => builder.add_source(File::from(path).required(false)),
                None => builder,
            },
        };

        builder = builder.add_source(
            Environment::with_prefix("STENCIL")
                .prefix_separator("_")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("bootstrap.venv_args")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load configuration")
    }

    /// Path to the default configuration file.
    ///
    /// `None` when the platform has no home directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Like [`Self::config_path`], falling back to `.stencil.toml` in the
    /// current directory.
    pub fn display_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(Self::config_path)
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn docs_are_kept_by_default() {
        let cfg = AppConfig::default();
        assert!(cfg.bootstrap.create_docs);
        assert!(!cfg.bootstrap.create_venv);
    }

    #[test]
    fn default_interpreter_and_marker() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bootstrap.interpreter, "python3");
        assert_eq!(cfg.clean.marker, "tasks.py");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[bootstrap]\ncreate_venv = true\nvenv_args = [\"--without-pip\"]\n\n[github]\nusername = \"octocat\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert!(cfg.bootstrap.create_venv);
        assert_eq!(cfg.bootstrap.venv_args, vec!["--without-pip"]);
        assert_eq!(cfg.github.username.as_deref(), Some("octocat"));
        // Untouched keys keep their defaults.
        assert_eq!(cfg.bootstrap.interpreter, "python3");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here/stencil.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn display_path_prefers_explicit() {
        let p = AppConfig::display_path(Some(Path::new("custom.toml")));
        assert_eq!(p, PathBuf::from("custom.toml"));
    }
}
