//! Host interpreter adapter using `std::process::Command`.

use std::path::Path;
use std::process::{Command, Output};

use stencil_core::{
    application::{ApplicationError, ports::Interpreter},
    domain::InterpreterVersion,
    error::StencilResult,
};
use tracing::{debug, instrument};

/// Prints `major.minor.micro` on every supported interpreter.
const VERSION_PROBE: &str = "import sys; print('%d.%d.%d' % sys.version_info[:3])";

/// Runs a Python interpreter found on `PATH` (or at an explicit path).
#[derive(Debug, Clone)]
pub struct SystemInterpreter {
    program: String,
}

impl SystemInterpreter {
    pub const DEFAULT_PROGRAM: &'static str = "python3";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemInterpreter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Interpreter for SystemInterpreter {
    fn program(&self) -> String {
        self.program.clone()
    }

    #[instrument(skip(self), fields(program = %self.program))]
    fn version(&self) -> StencilResult<InterpreterVersion> {
        let output = Command::new(&self.program)
            .args(["-c", VERSION_PROBE])
            .output()
            .map_err(|e| ApplicationError::InterpreterUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::InterpreterUnavailable {
                program: self.program.clone(),
                reason: failure_reason(&output),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version: InterpreterVersion = stdout.trim().parse()?;
        debug!(%version, "Interpreter version detected");
        Ok(version)
    }

    #[instrument(skip(self), fields(program = %self.program, target = %target.display()))]
    fn create_environment(&self, target: &Path, args: &[String]) -> StencilResult<()> {
        let output = Command::new(&self.program)
            .args(["-m", "venv"])
            .args(args)
            .arg(target)
            .output()
            .map_err(|e| ApplicationError::EnvironmentCreationFailed {
                path: target.to_path_buf(),
                reason: format!("could not run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::EnvironmentCreationFailed {
                path: target.to_path_buf(),
                reason: failure_reason(&output),
            }
            .into());
        }

        debug!("Environment created");
        Ok(())
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {}", output.status, stderr)
    }
}
