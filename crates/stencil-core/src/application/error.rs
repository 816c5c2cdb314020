//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (filesystem,
//! subprocesses), not rule violations. Rule violations are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed for a reason other than absence.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A path that was expected to exist does not.
    #[error("No such file or directory: {path}")]
    PathNotFound { path: PathBuf },

    /// A manifest directory still holds entries the manifest does not list.
    #[error("Directory is not empty: {path}")]
    DirectoryNotEmpty { path: PathBuf },

    /// The project root is missing or is not a directory.
    #[error("Project root is not a directory: {path}")]
    RootNotADirectory { path: PathBuf },

    /// The interpreter could not be run or did not report a version.
    #[error("Interpreter '{program}' unavailable: {reason}")]
    InterpreterUnavailable { program: String, reason: String },

    /// Environment creation subprocess failed.
    #[error("Failed to create virtual environment at {path}: {reason}")]
    EnvironmentCreationFailed { path: PathBuf, reason: String },

    /// No ancestor directory contains the project marker file.
    #[error("Could not find the project root: no '{marker}' in {start} or any parent")]
    ProjectRootNotFound { start: PathBuf, marker: String },

    /// A manifest file could not be read or parsed.
    #[error("Failed to load manifest {path}: {reason}")]
    ManifestLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PathNotFound { path } => vec![
                format!("Expected to find: {}", path.display()),
                "Drop --strict to treat already-removed paths as done".into(),
            ],
            Self::DirectoryNotEmpty { path } => vec![
                format!("{} contains files the manifest does not list", path.display()),
                "Add them to the manifest or remove them by hand".into(),
            ],
            Self::RootNotADirectory { path } => vec![
                format!("Expected a rendered project at {}", path.display()),
                "Run the hook from inside the rendered project or pass its path".into(),
            ],
            Self::InterpreterUnavailable { program, .. } => vec![
                format!("Check that '{}' is installed and on PATH", program),
                "Choose another interpreter with --interpreter".into(),
            ],
            Self::EnvironmentCreationFailed { .. } => vec![
                "Check the interpreter output above for details".into(),
                "Verify the extra --venv-arg values are accepted by `python -m venv`".into(),
                "Re-run without --venv and create the environment by hand".into(),
            ],
            Self::ProjectRootNotFound { marker, .. } => vec![
                format!("Run from inside a project containing {}", marker),
                "Or pass the project directory explicitly".into(),
            ],
            Self::ManifestLoad { path, .. } => vec![
                format!("Check the manifest file: {}", path.display()),
                "Expected keys: files, directories, enclosing".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathNotFound { .. }
            | Self::RootNotADirectory { .. }
            | Self::ProjectRootNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestLoad { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::DirectoryNotEmpty { .. }
            | Self::InterpreterUnavailable { .. }
            | Self::EnvironmentCreationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
