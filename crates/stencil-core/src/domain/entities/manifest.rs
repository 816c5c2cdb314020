//! Removal manifests: the fixed lists of paths a hook may delete.
//!
//! A manifest is plain data. The built-in one describes the Sphinx docs
//! scaffold; others can be loaded from TOML by an adapter.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::common::RelativePath;
use crate::domain::DomainError;

const DOCS_FILES: &[&str] = &[
    "docs/conf.py",
    "docs/index.rst",
    "docs/Makefile",
    "docs/make.bat",
    "docs/_static/.gitkeep",
    "docs/_templates/.gitkeep",
];

const DOCS_DIRECTORIES: &[&str] = &["docs/_static", "docs/_templates"];

const DOCS_ENCLOSING: &str = "docs";

/// Declarative list of paths eligible for deletion.
///
/// Removal order is always: every file, then every directory (deepest
/// first), then the enclosing directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemovalManifest {
    #[serde(default)]
    pub files: Vec<RelativePath>,

    #[serde(default)]
    pub directories: Vec<RelativePath>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<RelativePath>,
}

impl RemovalManifest {
    /// The documentation subtree removed when docs are not wanted.
    pub fn docs() -> Self {
        Self {
            files: DOCS_FILES.iter().map(|p| RelativePath::new(*p)).collect(),
            directories: DOCS_DIRECTORIES
                .iter()
                .map(|p| RelativePath::new(*p))
                .collect(),
            enclosing: Some(RelativePath::new(DOCS_ENCLOSING)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.enclosing.is_none()
    }

    /// Number of paths the manifest names.
    pub fn len(&self) -> usize {
        self.files.len() + self.directories.len() + usize::from(self.enclosing.is_some())
    }

    /// Directories ordered so children come before their parents.
    pub fn directories_deepest_first(&self) -> Vec<&RelativePath> {
        let mut dirs: Vec<&RelativePath> = self.directories.iter().collect();
        dirs.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| a.cmp(b)));
        dirs
    }

    /// Every path in removal order.
    pub fn removal_order(&self) -> Vec<&RelativePath> {
        let mut order: Vec<&RelativePath> = self.files.iter().collect();
        order.extend(self.directories_deepest_first());
        order.extend(self.enclosing.iter());
        order
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyManifest);
        }

        let mut seen = HashSet::new();
        for path in self.removal_order() {
            if !seen.insert(path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// What to do when a listed path is already gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPathPolicy {
    /// A missing path is fatal.
    Strict,
    /// A missing path counts as already removed.
    #[default]
    Idempotent,
}

/// Outcome of a removal pass, in the order the paths were visited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl PruneReport {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn merge(&mut self, other: PruneReport) {
        self.removed.extend(other.removed);
        self.skipped.extend(other.skipped);
    }
}
