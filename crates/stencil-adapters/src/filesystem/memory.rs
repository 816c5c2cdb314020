//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{ApplicationError, WalkEntry, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// In-memory filesystem for testing.
///
/// Adding a file or directory also adds every ancestor directory, so the
/// tree is always connected.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.files.keys().any(|p| p.parent() == Some(dir))
            || self.directories.iter().any(|p| p.parent() == Some(dir))
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file and its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.add_ancestors(path);
        inner.files.insert(path.to_path_buf(), content.to_string());
    }

    /// Add a directory and its parents (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.add_ancestors(path);
        inner.directories.insert(path.to_path_buf());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    fn read(&self) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;
        if inner.directories.contains(path) {
            return Err(not_a_file(path));
        }
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(not_found(path)),
        }
    }

    fn remove_dir(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(not_a_directory(path));
        }
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }
        if inner.has_children(path) {
            return Err(ApplicationError::DirectoryNotEmpty {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.directories.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(not_a_directory(path));
        }
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }

        let mut names: Vec<String> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    fn walk(&self, root: &Path) -> StencilResult<Vec<WalkEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(not_found(root));
        }

        let mut found: Vec<WalkEntry> = inner
            .directories
            .iter()
            .map(|p| (p, true))
            .chain(inner.files.keys().map(|p| (p, false)))
            .filter(|(p, _)| p.starts_with(root) && p.as_path() != root)
            .map(|(p, is_dir)| WalkEntry {
                path: p.clone(),
                is_dir,
            })
            .collect();
        // Parents sort before their children.
        found.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(found)
    }
}

fn lock_poisoned() -> StencilError {
    StencilError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn not_found(path: &Path) -> StencilError {
    ApplicationError::PathNotFound {
        path: path.to_path_buf(),
    }
    .into()
}

fn not_a_file(path: &Path) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Is a directory".into(),
    }
    .into()
}

fn not_a_directory(path: &Path) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Not a directory".into(),
    }
    .into()
}
