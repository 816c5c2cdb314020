// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep them around)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input Validation (pre-generation hook)
    // ========================================================================
    #[error("The project_name ({name}) {reason}.")]
    InvalidProjectName { name: String, reason: String },

    #[error("The module_name ({name}) is not a valid Python module name.")]
    InvalidModuleName { name: String },

    // ========================================================================
    // Manifest Constraints
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Path cannot be empty")]
    EmptyPath,

    #[error("Removal manifest lists nothing to remove")]
    EmptyManifest,

    #[error("Duplicate path in manifest: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Interpreter
    // ========================================================================
    #[error("Cannot parse interpreter version from '{input}'")]
    InvalidVersion { input: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Project names may not contain whitespace".into(),
                "Use hyphens or underscores instead: my-project, my_project".into(),
            ],
            Self::InvalidModuleName { .. } => vec![
                "Module names must start with a letter or underscore".into(),
                "Only letters, digits and underscores are allowed after that".into(),
                "Module names need at least two characters".into(),
                "Examples: mypackage, my_package, _internal2".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("'{}' must be relative to the project root", path),
                "Manifest entries look like: docs/conf.py".into(),
            ],
            Self::EmptyManifest => vec![
                "Add at least one entry under files, directories or enclosing".into(),
            ],
            Self::DuplicatePath { path } => vec![format!("Remove the repeated entry '{}'", path)],
            Self::InvalidVersion { input } => vec![
                format!("Interpreter reported: {}", input),
                "Check that the configured interpreter is a CPython executable".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidModuleName { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::EmptyPath
            | Self::EmptyManifest
            | Self::DuplicatePath { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidVersion { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
