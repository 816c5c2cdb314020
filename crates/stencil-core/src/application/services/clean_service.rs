//! Clean Service - removes build and cache artifacts.
//!
//! Every removal is idempotent: an artifact that is not there is reported
//! as skipped.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, WalkEntry},
    },
    domain::{ArtifactCategory, ArtifactTarget, PruneReport, is_compiled_artifact},
    error::StencilResult,
};

pub struct CleanService {
    filesystem: Arc<dyn Filesystem>,
}

impl CleanService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(root = %root.display(), categories = categories.len()))]
    pub fn clean(&self, root: &Path, categories: &[ArtifactCategory]) -> StencilResult<PruneReport> {
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::RootNotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut report = PruneReport::default();
        for category in categories {
            debug!(category = %category, "Cleaning");
            for target in category.targets() {
                report.merge(self.clean_target(root, &target)?);
            }
        }

        info!(
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            "Clean finished"
        );
        Ok(report)
    }

    fn clean_target(&self, root: &Path, target: &ArtifactTarget) -> StencilResult<PruneReport> {
        match target {
            ArtifactTarget::Directory(rel) => {
                self.remove_idempotent(&rel.under(root), |p| self.filesystem.remove_dir_all(p))
            }
            ArtifactTarget::File(rel) => {
                self.remove_idempotent(&rel.under(root), |p| self.filesystem.remove_file(p))
            }
            ArtifactTarget::CompiledUnder(rel) => self.clean_compiled(&rel.under(root)),
        }
    }

    fn clean_compiled(&self, dir: &Path) -> StencilResult<PruneReport> {
        if !self.filesystem.is_dir(dir) {
            return Ok(PruneReport {
                removed: vec![],
                skipped: vec![dir.to_path_buf()],
            });
        }

        let mut report = PruneReport::default();
        for artifact in compiled_artifacts(self.filesystem.walk(dir)?) {
            report.merge(self.remove_idempotent(&artifact.path, |p| {
                if artifact.is_dir {
                    self.filesystem.remove_dir_all(p)
                } else {
                    self.filesystem.remove_file(p)
                }
            })?);
        }
        Ok(report)
    }

    fn remove_idempotent<F>(&self, path: &Path, remove: F) -> StencilResult<PruneReport>
    where
        F: FnOnce(&Path) -> StencilResult<()>,
    {
        let mut report = PruneReport::default();
        match remove(path) {
            Ok(()) => report.removed.push(path.to_path_buf()),
            Err(e) if e.is_not_found() => report.skipped.push(path.to_path_buf()),
            Err(e) => return Err(e),
        }
        Ok(report)
    }
}

/// Matching paths, minus anything inside an already matched directory.
fn compiled_artifacts(entries: Vec<WalkEntry>) -> Vec<WalkEntry> {
    let mut matched: Vec<WalkEntry> = Vec::new();
    for entry in entries {
        if !is_compiled_artifact(&entry.path, entry.is_dir) {
            continue;
        }
        if matched.iter().any(|m| entry.path.starts_with(&m.path)) {
            continue;
        }
        matched.push(entry);
    }
    matched
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockFilesystem;

    fn entry(path: &str, is_dir: bool) -> WalkEntry {
        WalkEntry {
            path: PathBuf::from(path),
            is_dir,
        }
    }

    #[test]
    fn nested_matches_collapse_into_parent() {
        let found = compiled_artifacts(vec![
            entry("/p/src/pkg", true),
            entry("/p/src/pkg/__pycache__", true),
            entry("/p/src/pkg/__pycache__/mod.cpython-311.pyc", false),
            entry("/p/src/pkg/stray.pyc", false),
            entry("/p/src/pkg/mod.py", false),
        ]);
        let paths: Vec<PathBuf> = found.into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/p/src/pkg/__pycache__"),
                PathBuf::from("/p/src/pkg/stray.pyc"),
            ]
        );
    }

    #[test]
    fn absent_directories_are_skipped() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_remove_dir_all().returning(|p| {
            Err(ApplicationError::PathNotFound {
                path: p.to_path_buf(),
            }
            .into())
        });

        let svc = CleanService::new(Arc::new(fs));
        let report = svc
            .clean(Path::new("/p"), &[ArtifactCategory::Dists, ArtifactCategory::Tox])
            .unwrap();

        assert!(report.removed.is_empty());
        assert_eq!(
            report.skipped,
            vec![PathBuf::from("/p/dist"), PathBuf::from("/p/.tox")]
        );
    }

    #[test]
    fn coverage_removes_a_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_remove_file()
            .withf(|p| p == Path::new("/p/.coverage"))
            .times(1)
            .returning(|_| Ok(()));

        let svc = CleanService::new(Arc::new(fs));
        let report = svc.clean(Path::new("/p"), &[ArtifactCategory::Coverage]).unwrap();

        assert_eq!(report.removed, vec![PathBuf::from("/p/.coverage")]);
    }

    #[test]
    fn permission_errors_stop_the_clean() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_remove_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let svc = CleanService::new(Arc::new(fs));
        assert!(svc.clean(Path::new("/p"), &[ArtifactCategory::BuildDir]).is_err());
    }
}
