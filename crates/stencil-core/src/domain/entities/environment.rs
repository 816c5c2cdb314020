//! Outcomes of the virtual-environment stage.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::InterpreterVersion;

/// Relative location of the environment inside the project.
pub const VENV_DIR: &str = "venv";

/// Oldest interpreter the generated package supports.
pub const MINIMUM_INTERPRETER: InterpreterVersion = InterpreterVersion::new(3, 6);

/// Result of the environment stage. Every variant is a success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnvironmentOutcome {
    /// The environment was created.
    Created {
        path: PathBuf,
        interpreter: InterpreterVersion,
    },
    /// Environment creation was not requested.
    Disabled,
    /// Creation was requested but skipped; a warning was emitted.
    Skipped { reason: SkipReason },
}

impl EnvironmentOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Why environment creation was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedInterpreter {
        found: InterpreterVersion,
        minimum: InterpreterVersion,
    },
    InterpreterUnavailable {
        detail: String,
    },
    AlreadyExists {
        path: PathBuf,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInterpreter { found, minimum } => write!(
                f,
                "interpreter {found} is older than the minimum supported {minimum}; skipping virtual environment creation"
            ),
            Self::InterpreterUnavailable { detail } => write!(
                f,
                "could not determine the interpreter version ({detail}); skipping virtual environment creation"
            ),
            Self::AlreadyExists { path } => write!(
                f,
                "{} already exists; leaving it untouched",
                path.display()
            ),
        }
    }
}
