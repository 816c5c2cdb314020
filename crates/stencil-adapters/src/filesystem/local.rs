//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{
    application::{ApplicationError, WalkEntry, ports::Filesystem},
    error::{StencilError, StencilResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory tree"))
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn walk(&self, root: &Path) -> StencilResult<Vec<WalkEntry>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(io_err) => map_io_error(&at, io_err, "walk directory"),
                    None => ApplicationError::FilesystemError {
                        path: at,
                        reason: "filesystem loop detected".into(),
                    }
                    .into(),
                }
            })?;
            found.push(WalkEntry {
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(found)
    }
}

/// Translate an `io::Error` into the port's error contract.
fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    let path = path.to_path_buf();
    match e.kind() {
        io::ErrorKind::NotFound => ApplicationError::PathNotFound { path },
        io::ErrorKind::DirectoryNotEmpty => ApplicationError::DirectoryNotEmpty { path },
        _ => ApplicationError::FilesystemError {
            path,
            reason: format!("Failed to {}: {}", operation, e),
        },
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_path_not_found() {
        let err = map_io_error(
            Path::new("x"),
            io::Error::from(io::ErrorKind::NotFound),
            "remove file",
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn permission_denied_is_a_filesystem_error() {
        let err = map_io_error(
            Path::new("x"),
            io::Error::from(io::ErrorKind::PermissionDenied),
            "remove file",
        );
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(err.to_string().contains("Failed to remove file"));
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let names = LocalFilesystem::new().list_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
    }
}
