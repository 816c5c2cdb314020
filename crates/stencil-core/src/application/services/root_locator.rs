//! Project root discovery without touching the working directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::StencilResult,
};

/// File that marks the root of a generated project.
pub const DEFAULT_ROOT_MARKER: &str = "tasks.py";

/// Return `start` or the nearest ancestor containing `marker`.
///
/// `start` should be absolute; a relative start only searches the
/// ancestors that appear in the path itself.
pub fn locate_project_root(
    filesystem: &dyn Filesystem,
    start: &Path,
    marker: &str,
) -> StencilResult<PathBuf> {
    for dir in start.ancestors() {
        if filesystem.is_file(&dir.join(marker)) {
            debug!(root = %dir.display(), "Project root located");
            return Ok(dir.to_path_buf());
        }
    }

    Err(ApplicationError::ProjectRootNotFound {
        start: start.to_path_buf(),
        marker: marker.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    #[test]
    fn finds_marker_in_ancestor() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .returning(|p| p == Path::new("/work/proj/tasks.py"));

        let root = locate_project_root(&fs, Path::new("/work/proj/src/pkg"), "tasks.py").unwrap();
        assert_eq!(root, PathBuf::from("/work/proj"));
    }

    #[test]
    fn start_itself_can_be_the_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .returning(|p| p == Path::new("/work/proj/tasks.py"));

        let root = locate_project_root(&fs, Path::new("/work/proj"), "tasks.py").unwrap();
        assert_eq!(root, PathBuf::from("/work/proj"));
    }

    #[test]
    fn stops_at_filesystem_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);

        let err = locate_project_root(&fs, Path::new("/a/b"), "tasks.py").unwrap_err();
        assert!(err.to_string().contains("tasks.py"));
    }
}
