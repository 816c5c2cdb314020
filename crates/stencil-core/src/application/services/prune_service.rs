//! Tree Pruner - deletes the paths a removal manifest names.
//!
//! Files go first, then directories deepest first, then the enclosing
//! directory. Directory removal is never recursive: if something the
//! manifest does not list is still inside, pruning stops with
//! `DirectoryNotEmpty` instead of deleting it.
//!
//! Every listed path is checked before the first removal, so a run that
//! fails leaves the tree as it found it and fails the same way next time.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{InputValidator, MissingPathPolicy, PruneReport, RemovalManifest},
    error::StencilResult,
};

/// Removes manifest entries under a project root.
pub struct TreePruner {
    filesystem: Arc<dyn Filesystem>,
    policy: MissingPathPolicy,
}

#[derive(Clone, Copy)]
enum EntryKind {
    File,
    Directory,
}

impl TreePruner {
    pub fn new(filesystem: Arc<dyn Filesystem>, policy: MissingPathPolicy) -> Self {
        Self { filesystem, policy }
    }

    pub fn policy(&self) -> MissingPathPolicy {
        self.policy
    }

    #[instrument(skip_all, fields(root = %root.display(), entries = manifest.len(), policy = ?self.policy))]
    pub fn prune(&self, root: &Path, manifest: &RemovalManifest) -> StencilResult<PruneReport> {
        InputValidator::validate_manifest(manifest)?;

        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::RootNotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        self.preflight(root, manifest)?;

        let mut report = PruneReport::default();

        for file in &manifest.files {
            self.remove(&file.under(root), EntryKind::File, &mut report)?;
        }
        for dir in manifest.directories_deepest_first() {
            self.remove(&dir.under(root), EntryKind::Directory, &mut report)?;
        }
        if let Some(enclosing) = &manifest.enclosing {
            self.remove(&enclosing.under(root), EntryKind::Directory, &mut report)?;
        }

        info!(
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            "Pruning finished"
        );
        Ok(report)
    }

    /// Refuse to start when a listed path has the wrong kind, when a listed
    /// directory holds something unlisted, or (strict) when a path is gone.
    fn preflight(&self, root: &Path, manifest: &RemovalManifest) -> StencilResult<()> {
        let listed: HashSet<PathBuf> = manifest
            .removal_order()
            .into_iter()
            .map(|p| p.under(root))
            .collect();

        for file in &manifest.files {
            self.check(&file.under(root), EntryKind::File, &listed)?;
        }
        for dir in manifest.directories.iter().chain(manifest.enclosing.iter()) {
            self.check(&dir.under(root), EntryKind::Directory, &listed)?;
        }
        Ok(())
    }

    fn check(&self, path: &Path, kind: EntryKind, listed: &HashSet<PathBuf>) -> StencilResult<()> {
        if !self.filesystem.exists(path) {
            return match self.policy {
                MissingPathPolicy::Strict => Err(ApplicationError::PathNotFound {
                    path: path.to_path_buf(),
                }
                .into()),
                MissingPathPolicy::Idempotent => Ok(()),
            };
        }

        match kind {
            EntryKind::File if !self.filesystem.is_file(path) => {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "listed as a file but is not one".into(),
                }
                .into())
            }
            EntryKind::File => Ok(()),
            EntryKind::Directory if !self.filesystem.is_dir(path) => {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "listed as a directory but is not one".into(),
                }
                .into())
            }
            EntryKind::Directory => {
                let unlisted = self
                    .filesystem
                    .list_dir(path)?
                    .into_iter()
                    .find(|name| !listed.contains(&path.join(name)));
                match unlisted {
                    Some(name) => {
                        warn!(path = %path.display(), %name, "Unlisted content; nothing removed");
                        Err(ApplicationError::DirectoryNotEmpty {
                            path: path.to_path_buf(),
                        }
                        .into())
                    }
                    None => Ok(()),
                }
            }
        }
    }

    fn remove(&self, path: &Path, kind: EntryKind, report: &mut PruneReport) -> StencilResult<()> {
        let result = match kind {
            EntryKind::File => self.filesystem.remove_file(path),
            EntryKind::Directory => self.filesystem.remove_dir(path),
        };

        match result {
            Ok(()) => {
                debug!(path = %path.display(), "Removed");
                report.removed.push(path.to_path_buf());
                Ok(())
            }
            Err(e) if e.is_not_found() && self.policy == MissingPathPolicy::Idempotent => {
                debug!(path = %path.display(), "Already absent");
                report.skipped.push(path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Pruning failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        application::ports::MockFilesystem,
        domain::RelativePath,
        error::StencilError,
    };

    fn small_manifest() -> RemovalManifest {
        RemovalManifest {
            files: vec![RelativePath::new("docs/conf.py")],
            directories: vec![RelativePath::new("docs/_static")],
            enclosing: Some(RelativePath::new("docs")),
        }
    }

    /// Every listed path present, with exactly the listed children.
    fn intact_tree(fs: &mut MockFilesystem) {
        fs.expect_exists().return_const(true);
        fs.expect_is_file().return_const(true);
        fs.expect_is_dir().return_const(true);
        fs.expect_list_dir().returning(|p| {
            Ok(if p == Path::new("/p/docs") {
                vec!["_static".into(), "conf.py".into()]
            } else {
                Vec::new()
            })
        });
    }

    fn not_found(path: &str) -> StencilError {
        ApplicationError::PathNotFound {
            path: PathBuf::from(path),
        }
        .into()
    }

    #[test]
    fn removes_in_manifest_order() {
        let mut fs = MockFilesystem::new();
        let mut seq = mockall::Sequence::new();
        intact_tree(&mut fs);
        fs.expect_remove_file()
            .with(eq(Path::new("/p/docs/conf.py")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_remove_dir()
            .with(eq(Path::new("/p/docs/_static")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_remove_dir()
            .with(eq(Path::new("/p/docs")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        let report = pruner.prune(Path::new("/p"), &small_manifest()).unwrap();

        assert_eq!(report.removed.len(), 3);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn idempotent_policy_skips_missing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_exists().return_const(false);
        fs.expect_remove_file()
            .returning(|_| Err(not_found("/p/docs/conf.py")));
        fs.expect_remove_dir()
            .returning(|p| Err(not_found(&p.display().to_string())));

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        let report = pruner.prune(Path::new("/p"), &small_manifest()).unwrap();

        assert!(report.is_noop());
        assert_eq!(report.skipped.len(), 3);
    }

    #[test]
    fn strict_policy_fails_on_first_missing_before_removing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_is_file().return_const(true);
        fs.expect_list_dir().returning(|_| Ok(Vec::new()));
        fs.expect_exists()
            .returning(|p| p != Path::new("/p/docs/_static"));
        fs.expect_remove_file().never();
        fs.expect_remove_dir().never();

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Strict);
        let err = pruner.prune(Path::new("/p"), &small_manifest()).unwrap_err();

        assert_eq!(err, not_found("/p/docs/_static"));
    }

    #[test]
    fn unlisted_content_fails_before_anything_is_removed() {
        for policy in [MissingPathPolicy::Strict, MissingPathPolicy::Idempotent] {
            let mut fs = MockFilesystem::new();
            fs.expect_exists().return_const(true);
            fs.expect_is_file().return_const(true);
            fs.expect_is_dir().return_const(true);
            fs.expect_list_dir().returning(|p| {
                Ok(if p == Path::new("/p/docs") {
                    vec!["_static".into(), "conf.py".into(), "usage.rst".into()]
                } else {
                    Vec::new()
                })
            });
            fs.expect_remove_file().never();
            fs.expect_remove_dir().never();

            let pruner = TreePruner::new(Arc::new(fs), policy);
            let err = pruner.prune(Path::new("/p"), &small_manifest()).unwrap_err();

            let expected: StencilError = ApplicationError::DirectoryNotEmpty {
                path: PathBuf::from("/p/docs"),
            }
            .into();
            assert_eq!(err, expected);
        }
    }

    #[test]
    fn listed_file_that_is_a_directory_is_refused() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(true);
        fs.expect_is_file().return_const(false);
        fs.expect_remove_file().never();

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        assert!(matches!(
            pruner.prune(Path::new("/p"), &small_manifest()),
            Err(StencilError::Application(ApplicationError::FilesystemError { .. }))
        ));
    }

    #[test]
    fn other_errors_are_fatal_even_when_idempotent() {
        let mut fs = MockFilesystem::new();
        intact_tree(&mut fs);
        fs.expect_remove_file().returning(|_| Ok(()));
        fs.expect_remove_dir().times(1).returning(|p| {
            Err(ApplicationError::DirectoryNotEmpty {
                path: p.to_path_buf(),
            }
            .into())
        });

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        let err = pruner.prune(Path::new("/p"), &small_manifest()).unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::DirectoryNotEmpty { .. })
        ));
    }

    #[test]
    fn missing_root_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_remove_file().never();

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        assert!(matches!(
            pruner.prune(Path::new("/nope"), &small_manifest()),
            Err(StencilError::Application(
                ApplicationError::RootNotADirectory { .. }
            ))
        ));
    }

    #[test]
    fn empty_manifest_is_rejected_before_touching_disk() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().never();

        let pruner = TreePruner::new(Arc::new(fs), MissingPathPolicy::Idempotent);
        assert!(matches!(
            pruner.prune(Path::new("/p"), &RemovalManifest::default()),
            Err(StencilError::Domain(_))
        ));
    }
}
