//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{InterpreterVersion, RemovalManifest};
use crate::error::StencilResult;

/// One entry found while walking a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Error contract
///
/// Removal methods report an absent target as
/// `ApplicationError::PathNotFound` and a non-empty directory as
/// `ApplicationError::DirectoryNotEmpty`. Everything else is a
/// `FilesystemError`. Callers rely on that split to decide what is fatal.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Remove a single file. Fails on directories.
    fn remove_file(&self, path: &Path) -> StencilResult<()>;

    /// Remove an empty directory. Never recursive.
    fn remove_dir(&self, path: &Path) -> StencilResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Names of the direct children of `path`, sorted.
    fn list_dir(&self, path: &Path) -> StencilResult<Vec<String>>;

    /// Every entry below `root` (excluding `root`), parents before children.
    fn walk(&self, root: &Path) -> StencilResult<Vec<WalkEntry>>;
}

/// Port for the host Python interpreter.
///
/// Implemented by `stencil_adapters::interpreter::SystemInterpreter`.
#[cfg_attr(test, mockall::automock)]
pub trait Interpreter: Send + Sync {
    /// Program name shown in messages.
    fn program(&self) -> String;

    /// Ask the interpreter for its version.
    fn version(&self) -> StencilResult<InterpreterVersion>;

    /// Create an isolated environment at `target`, passing `args` to the
    /// creator verbatim.
    fn create_environment(&self, target: &Path, args: &[String]) -> StencilResult<()>;
}

/// Port for obtaining a removal manifest.
///
/// Implemented by:
/// - `stencil_adapters::manifest::BuiltinManifest` (docs subtree)
/// - `stencil_adapters::manifest::TomlManifestFile` (user-supplied)
pub trait ManifestSource: Send + Sync {
    fn load(&self) -> StencilResult<RemovalManifest>;

    /// Where the manifest came from, for logs.
    fn describe(&self) -> String;
}
