//! Bootstrap Service - the post-generation pipeline.
//!
//! This service coordinates the stages that follow template rendering:
//! 1. Prune the docs subtree when docs were not requested
//! 2. Create the virtual environment when requested
//! 3. Print the manual next steps
//!
//! Input validation happens before rendering and again when the options
//! are built, so an invalid name never reaches this service.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, EnvironmentBootstrapper, InstructionEmitter, TreePruner,
        ports::{Filesystem, Interpreter},
    },
    domain::{
        BootstrapOptions, EnvironmentOutcome, InterpreterVersion, MissingPathPolicy,
        PruneReport, RemovalManifest, SetupInstructions,
    },
    error::StencilResult,
};

/// What each stage did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub root: PathBuf,
    /// `None` when docs were kept and nothing was pruned.
    pub pruned: Option<PruneReport>,
    pub environment: EnvironmentOutcome,
    pub instructions: SetupInstructions,
}

/// Main post-generation service.
pub struct BootstrapService {
    filesystem: Arc<dyn Filesystem>,
    pruner: TreePruner,
    environment: EnvironmentBootstrapper,
    emitter: InstructionEmitter,
}

impl BootstrapService {
    /// Create a bootstrap service with the default idempotent pruning policy.
    pub fn new(filesystem: Arc<dyn Filesystem>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self::with_policy(filesystem, interpreter, MissingPathPolicy::default())
    }

    pub fn with_policy(
        filesystem: Arc<dyn Filesystem>,
        interpreter: Arc<dyn Interpreter>,
        policy: MissingPathPolicy,
    ) -> Self {
        Self {
            pruner: TreePruner::new(Arc::clone(&filesystem), policy),
            environment: EnvironmentBootstrapper::new(Arc::clone(&filesystem), interpreter),
            emitter: InstructionEmitter::new(Arc::clone(&filesystem)),
            filesystem,
        }
    }

    /// Override the minimum interpreter version for the environment stage.
    pub fn with_minimum_interpreter(mut self, minimum: InterpreterVersion) -> Self {
        self.environment = self.environment.with_minimum(minimum);
        self
    }

    /// Run prune → environment → instructions against `root`.
    ///
    /// Instructions are written to `out` only after the earlier stages
    /// succeeded; a fatal error in either stops the run before anything is
    /// printed.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            project = %options.project_name(),
            create_docs = options.create_docs(),
            create_venv = options.create_venv(),
        )
    )]
    pub fn run(
        &self,
        root: &Path,
        options: &BootstrapOptions,
        docs_manifest: &RemovalManifest,
        out: &mut dyn Write,
    ) -> StencilResult<BootstrapReport> {
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::RootNotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        // 1. Prune
        let pruned = if options.create_docs() {
            None
        } else {
            Some(self.pruner.prune(root, docs_manifest)?)
        };

        // 2. Environment
        let environment = self.environment.bootstrap(root, options)?;

        // 3. Instructions
        let instructions = self
            .emitter
            .prepare(root, options, environment.is_created());
        self.emitter.emit(&instructions, out);

        info!("Bootstrap completed successfully");
        Ok(BootstrapReport {
            root: root.to_path_buf(),
            pruned,
            environment,
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockInterpreter},
        domain::SkipReason,
        error::StencilError,
    };

    fn options(create_docs: bool, create_venv: bool) -> BootstrapOptions {
        BootstrapOptions::builder()
            .project_name("demo")
            .unwrap()
            .create_docs(create_docs)
            .create_venv(create_venv)
            .build()
            .unwrap()
    }

    fn listing_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_exists().return_const(false);
        fs.expect_list_dir()
            .returning(|_| Ok(vec!["setup.py".into(), "tasks.py".into(), "tests".into()]));
        fs
    }

    #[test]
    fn keeps_docs_when_requested() {
        let mut fs = listing_fs();
        fs.expect_remove_file().never();
        fs.expect_remove_dir().never();

        let svc = BootstrapService::new(Arc::new(fs), Arc::new(MockInterpreter::new()));
        let mut out = Vec::new();
        let report = svc
            .run(Path::new("/p"), &options(true, false), &RemovalManifest::docs(), &mut out)
            .unwrap();

        assert!(report.pruned.is_none());
        assert_eq!(report.environment, EnvironmentOutcome::Disabled);
        assert!(String::from_utf8(out).unwrap().contains("git add setup.py tasks.py tests"));
    }

    #[test]
    fn prunes_docs_when_not_requested() {
        let mut fs = listing_fs();
        fs.expect_remove_file().returning(|_| Ok(()));
        fs.expect_remove_dir().returning(|_| Ok(()));

        let svc = BootstrapService::new(Arc::new(fs), Arc::new(MockInterpreter::new()));
        let manifest = RemovalManifest::docs();
        let report = svc
            .run(Path::new("/p"), &options(false, false), &manifest, &mut Vec::new())
            .unwrap();

        assert_eq!(report.pruned.unwrap().removed.len(), manifest.len());
    }

    #[test]
    fn prune_failure_halts_before_environment_and_output() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_exists().return_const(true);
        fs.expect_is_file().return_const(true);
        fs.expect_list_dir().returning(|_| Ok(Vec::new()));
        fs.expect_remove_file().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only filesystem".into(),
            }
            .into())
        });
        let mut interp = MockInterpreter::new();
        interp.expect_version().never();

        let svc = BootstrapService::new(Arc::new(fs), Arc::new(interp));
        let mut out = Vec::new();
        let result = svc.run(
            Path::new("/p"),
            &options(false, true),
            &RemovalManifest::docs(),
            &mut out,
        );

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn unsupported_interpreter_still_succeeds() {
        let fs = listing_fs();
        let mut interp = MockInterpreter::new();
        interp
            .expect_version()
            .returning(|| Ok(InterpreterVersion::with_patch(3, 5, 10)));
        interp.expect_create_environment().never();

        let svc = BootstrapService::new(Arc::new(fs), Arc::new(interp));
        let mut out = Vec::new();
        let report = svc
            .run(Path::new("/p"), &options(true, true), &RemovalManifest::docs(), &mut out)
            .unwrap();

        assert!(matches!(
            report.environment,
            EnvironmentOutcome::Skipped {
                reason: SkipReason::UnsupportedInterpreter { .. }
            }
        ));
        // Environment was not created, so the manual step stays in.
        assert!(String::from_utf8(out).unwrap().contains("python -m venv venv"));
    }

    #[test]
    fn missing_root_fails_first() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);

        let svc = BootstrapService::new(Arc::new(fs), Arc::new(MockInterpreter::new()));
        let err = svc
            .run(
                Path::new("/missing"),
                &options(false, false),
                &RemovalManifest::docs(),
                &mut Vec::new(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::RootNotADirectory { .. })
        ));
    }

    #[test]
    fn report_serializes_to_json() {
        let fs = listing_fs();
        let svc = BootstrapService::new(Arc::new(fs), Arc::new(MockInterpreter::new()));
        let report = svc
            .run(Path::new("/p"), &options(true, false), &RemovalManifest::docs(), &mut Vec::new())
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["environment"]["status"], "disabled");
        assert!(json["pruned"].is_null());
    }
}
