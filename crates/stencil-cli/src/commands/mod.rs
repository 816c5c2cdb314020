//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments and configuration into core calls and
//! render the results. No business logic lives here.

pub mod bootstrap;
pub mod clean;
pub mod completions;
pub mod config;
pub mod instructions;
pub mod manifest;
pub mod validate;

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use stencil_adapters::{BuiltinManifest, TomlManifestFile};
use stencil_core::{
    application::{ApplicationError, ports::ManifestSource},
    domain::BootstrapOptionsBuilder,
    error::StencilError,
};

use crate::{
    cli::ProjectArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Builder pre-filled with the project identity: name, module and remote.
///
/// Flags win over configuration.
pub(crate) fn project_builder(
    project: &ProjectArgs,
    config: &AppConfig,
) -> CliResult<BootstrapOptionsBuilder> {
    let name = match &project.project_name {
        Some(name) => name.clone(),
        None => name_from_root(&project.root)?,
    };

    let mut builder = stencil_core::domain::BootstrapOptions::builder()
        .project_name(name)
        .map_err(StencilError::from)?;

    if let Some(module) = &project.module_name {
        builder = builder
            .module_name(module.as_str())
            .map_err(StencilError::from)?;
    }
    if let Some(user) = project
        .github_username
        .as_ref()
        .or(config.github.username.as_ref())
    {
        builder = builder.github_username(user.as_str());
    }
    if let Some(repo) = &project.github_repo {
        builder = builder.github_repo_name(repo.as_str());
    }

    Ok(builder)
}

/// The root directory's own name, used when `--project-name` is omitted.
fn name_from_root(root: &Path) -> CliResult<String> {
    let resolved = root.canonicalize().map_err(|_| {
        StencilError::from(ApplicationError::RootNotADirectory {
            path: root.to_path_buf(),
        })
    })?;

    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "cannot derive a project name from {}; pass --project-name",
                resolved.display()
            ),
        })
}

/// Print after the hook's work is done; a closed or full stdout is logged,
/// never turned into a failed hook.
pub(crate) fn best_effort(result: io::Result<()>, what: &str) {
    if let Err(e) = result {
        warn!(error = %e, "Could not print {what}");
    }
}

/// The built-in docs manifest, or the TOML file at `file`.
pub(crate) fn manifest_source(file: Option<PathBuf>) -> Box<dyn ManifestSource> {
    match file {
        Some(path) => Box::new(TomlManifestFile::new(path)),
        None => Box::new(BuiltinManifest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(root: &Path, name: Option<&str>) -> ProjectArgs {
        ProjectArgs {
            root: root.to_path_buf(),
            project_name: name.map(str::to_owned),
            module_name: None,
            github_username: None,
            github_repo: None,
        }
    }

    #[test]
    fn project_name_defaults_to_root_directory() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("my-lib");
        std::fs::create_dir(&root).unwrap();

        let options = project_builder(&project(&root, None), &AppConfig::default())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(options.project_name().as_str(), "my-lib");
    }

    #[test]
    fn missing_root_without_name_is_not_found() {
        let err = project_builder(
            &project(Path::new("/definitely/not/here"), None),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn configured_username_is_used_when_flag_absent() {
        let mut config = AppConfig::default();
        config.github.username = Some("octocat".into());

        let options = project_builder(&project(Path::new("."), Some("demo")), &config)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(options.github_username(), "octocat");
    }

    #[test]
    fn invalid_project_name_is_a_user_error() {
        let err = project_builder(
            &project(Path::new("."), Some("My Project")),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn best_effort_swallows_write_errors() {
        best_effort(Err(io::Error::from(io::ErrorKind::BrokenPipe)), "report");
        best_effort(Ok(()), "report");
    }

    #[test]
    fn manifest_source_describes_its_origin() {
        assert_eq!(manifest_source(None).describe(), "built-in docs manifest");
        assert_eq!(
            manifest_source(Some(PathBuf::from("m.toml"))).describe(),
            "m.toml"
        );
    }
}
