//! Environment Bootstrapper - optional virtual environment creation.
//!
//! An old or missing interpreter is never fatal: the stage warns and
//! reports `Skipped`. A failed creation subprocess is fatal, and whatever
//! half-built environment it left behind is removed first.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Interpreter},
    },
    domain::{
        BootstrapOptions, EnvironmentOutcome, InterpreterVersion, MINIMUM_INTERPRETER,
        SkipReason, VENV_DIR,
    },
    error::{StencilError, StencilResult},
};

pub struct EnvironmentBootstrapper {
    filesystem: Arc<dyn Filesystem>,
    interpreter: Arc<dyn Interpreter>,
    minimum: InterpreterVersion,
}

impl EnvironmentBootstrapper {
    pub fn new(filesystem: Arc<dyn Filesystem>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            filesystem,
            interpreter,
            minimum: MINIMUM_INTERPRETER,
        }
    }

    /// Override the minimum supported version.
    pub fn with_minimum(mut self, minimum: InterpreterVersion) -> Self {
        self.minimum = minimum;
        self
    }

    #[instrument(skip_all, fields(root = %root.display(), requested = options.create_venv()))]
    pub fn bootstrap(
        &self,
        root: &Path,
        options: &BootstrapOptions,
    ) -> StencilResult<EnvironmentOutcome> {
        if !options.create_venv() {
            return Ok(EnvironmentOutcome::Disabled);
        }

        let target = root.join(VENV_DIR);
        if self.filesystem.exists(&target) {
            return Ok(skip(SkipReason::AlreadyExists { path: target }));
        }

        let version = match self.interpreter.version() {
            Ok(v) => v,
            Err(e) => {
                return Ok(skip(SkipReason::InterpreterUnavailable {
                    detail: e.to_string(),
                }));
            }
        };

        if version < self.minimum {
            return Ok(skip(SkipReason::UnsupportedInterpreter {
                found: version,
                minimum: self.minimum,
            }));
        }

        info!(
            interpreter = %self.interpreter.program(),
            version = %version,
            args = ?options.venv_args(),
            "Creating virtual environment"
        );

        if let Err(e) = self
            .interpreter
            .create_environment(&target, options.venv_args())
        {
            return Err(self.discard_partial(&target, e));
        }

        info!(path = %target.display(), "Virtual environment created");
        Ok(EnvironmentOutcome::Created {
            path: target,
            interpreter: version,
        })
    }

    /// Remove a partially created environment and build the error to return.
    fn discard_partial(&self, target: &Path, cause: StencilError) -> StencilError {
        let mut reason = match cause {
            StencilError::Application(ApplicationError::EnvironmentCreationFailed {
                reason, ..
            }) => reason,
            other => other.to_string(),
        };

        if self.filesystem.exists(target) {
            match self.filesystem.remove_dir_all(target) {
                Ok(()) => info!(path = %target.display(), "Removed partial environment"),
                Err(cleanup) => {
                    warn!(path = %target.display(), error = %cleanup, "Could not remove partial environment");
                    reason = format!(
                        "{reason}; the partial environment could not be removed: {cleanup}"
                    );
                }
            }
        }

        ApplicationError::EnvironmentCreationFailed {
            path: target.to_path_buf(),
            reason,
        }
        .into()
    }
}

fn skip(reason: SkipReason) -> EnvironmentOutcome {
    warn!("{reason}");
    EnvironmentOutcome::Skipped { reason }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::predicate::{always, eq};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockInterpreter};

    fn options(create_venv: bool) -> BootstrapOptions {
        BootstrapOptions::builder()
            .project_name("demo")
            .unwrap()
            .create_venv(create_venv)
            .venv_args(["--upgrade-deps"])
            .build()
            .unwrap()
    }

    fn interpreter_at(version: InterpreterVersion) -> MockInterpreter {
        let mut interp = MockInterpreter::new();
        interp.expect_program().return_const("python3".to_string());
        interp.expect_version().returning(move || Ok(version));
        interp
    }

    fn empty_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs
    }

    #[test]
    fn disabled_does_nothing() {
        let mut interp = MockInterpreter::new();
        interp.expect_version().never();
        let svc = EnvironmentBootstrapper::new(Arc::new(MockFilesystem::new()), Arc::new(interp));

        let outcome = svc.bootstrap(Path::new("/p"), &options(false)).unwrap();
        assert_eq!(outcome, EnvironmentOutcome::Disabled);
    }

    #[test]
    fn creates_with_verbatim_args() {
        let mut interp = interpreter_at(InterpreterVersion::new(3, 11));
        interp
            .expect_create_environment()
            .with(eq(Path::new("/p/venv")), always())
            .times(1)
            .returning(|_, args| {
                assert_eq!(args, ["--upgrade-deps".to_string()]);
                Ok(())
            });

        let svc = EnvironmentBootstrapper::new(Arc::new(empty_fs()), Arc::new(interp));
        let outcome = svc.bootstrap(Path::new("/p"), &options(true)).unwrap();

        assert_eq!(
            outcome,
            EnvironmentOutcome::Created {
                path: PathBuf::from("/p/venv"),
                interpreter: InterpreterVersion::new(3, 11),
            }
        );
    }

    #[test]
    fn old_interpreter_skips_without_error() {
        let mut interp = interpreter_at(InterpreterVersion::with_patch(2, 7, 18));
        interp.expect_create_environment().never();

        let svc = EnvironmentBootstrapper::new(Arc::new(empty_fs()), Arc::new(interp));
        let outcome = svc.bootstrap(Path::new("/p"), &options(true)).unwrap();

        assert!(matches!(
            outcome,
            EnvironmentOutcome::Skipped {
                reason: SkipReason::UnsupportedInterpreter { .. }
            }
        ));
    }

    #[test]
    fn minimum_itself_is_supported() {
        let mut interp = interpreter_at(MINIMUM_INTERPRETER);
        interp.expect_create_environment().returning(|_, _| Ok(()));

        let svc = EnvironmentBootstrapper::new(Arc::new(empty_fs()), Arc::new(interp));
        assert!(svc.bootstrap(Path::new("/p"), &options(true)).unwrap().is_created());
    }

    #[test]
    fn custom_minimum_is_honoured() {
        let mut interp = interpreter_at(InterpreterVersion::new(3, 8));
        interp.expect_create_environment().never();

        let svc = EnvironmentBootstrapper::new(Arc::new(empty_fs()), Arc::new(interp))
            .with_minimum(InterpreterVersion::new(3, 9));
        assert!(!svc.bootstrap(Path::new("/p"), &options(true)).unwrap().is_created());
    }

    #[test]
    fn missing_interpreter_skips_without_error() {
        let mut interp = MockInterpreter::new();
        interp.expect_version().returning(|| {
            Err(ApplicationError::InterpreterUnavailable {
                program: "python3".into(),
                reason: "not found".into(),
            }
            .into())
        });
        interp.expect_create_environment().never();

        let svc = EnvironmentBootstrapper::new(Arc::new(empty_fs()), Arc::new(interp));
        let outcome = svc.bootstrap(Path::new("/p"), &options(true)).unwrap();

        assert!(matches!(
            outcome,
            EnvironmentOutcome::Skipped {
                reason: SkipReason::InterpreterUnavailable { .. }
            }
        ));
    }

    #[test]
    fn existing_environment_is_left_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let mut interp = MockInterpreter::new();
        interp.expect_version().never();

        let svc = EnvironmentBootstrapper::new(Arc::new(fs), Arc::new(interp));
        let outcome = svc.bootstrap(Path::new("/p"), &options(true)).unwrap();

        assert!(matches!(
            outcome,
            EnvironmentOutcome::Skipped {
                reason: SkipReason::AlreadyExists { .. }
            }
        ));
    }

    #[test]
    fn failed_creation_removes_partial_environment() {
        let mut fs = MockFilesystem::new();
        let mut seq = mockall::Sequence::new();
        // Before creation: nothing there. After the failure: a partial dir.
        fs.expect_exists()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(false);
        fs.expect_exists()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        fs.expect_remove_dir_all()
            .with(eq(Path::new("/p/venv")))
            .times(1)
            .returning(|_| Ok(()));

        let mut interp = interpreter_at(InterpreterVersion::new(3, 12));
        interp.expect_create_environment().returning(|p, _| {
            Err(ApplicationError::EnvironmentCreationFailed {
                path: p.to_path_buf(),
                reason: "ensurepip failed".into(),
            }
            .into())
        });

        let svc = EnvironmentBootstrapper::new(Arc::new(fs), Arc::new(interp));
        let err = svc.bootstrap(Path::new("/p"), &options(true)).unwrap_err();

        assert_eq!(
            err,
            StencilError::Application(ApplicationError::EnvironmentCreationFailed {
                path: PathBuf::from("/p/venv"),
                reason: "ensurepip failed".into(),
            })
        );
    }

    #[test]
    fn failed_cleanup_is_reported() {
        let mut fs = MockFilesystem::new();
        let mut seq = mockall::Sequence::new();
        fs.expect_exists()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(false);
        fs.expect_exists()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        fs.expect_remove_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let mut interp = interpreter_at(InterpreterVersion::new(3, 12));
        interp.expect_create_environment().returning(|p, _| {
            Err(ApplicationError::EnvironmentCreationFailed {
                path: p.to_path_buf(),
                reason: "exit status 1".into(),
            }
            .into())
        });

        let svc = EnvironmentBootstrapper::new(Arc::new(fs), Arc::new(interp));
        let err = svc.bootstrap(Path::new("/p"), &options(true)).unwrap_err();

        assert!(err.to_string().contains("could not be removed"));
    }
}
