//! Build and cache artifacts produced by the generated project's tooling.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::common::RelativePath;

/// Directories searched for compiled artifacts.
pub const COMPILED_SCAN_ROOTS: &[&str] = &["src", "tests"];

/// A group of artifacts that can be cleaned together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactCategory {
    Dists,
    Docs,
    Compiled,
    Tox,
    Mypy,
    Coverage,
    Wheelhouse,
    CoverageReport,
    BuildDir,
}

/// A fixed location owned by a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactTarget {
    /// Removed recursively.
    Directory(RelativePath),
    File(RelativePath),
    /// Walked for `*.pyc`, `__pycache__` and `*.egg-info`.
    CompiledUnder(RelativePath),
}

impl ArtifactCategory {
    pub const ALL: [ArtifactCategory; 9] = [
        Self::Dists,
        Self::Docs,
        Self::Compiled,
        Self::Tox,
        Self::Mypy,
        Self::Coverage,
        Self::Wheelhouse,
        Self::CoverageReport,
        Self::BuildDir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dists => "dists",
            Self::Docs => "docs",
            Self::Compiled => "compiled",
            Self::Tox => "tox",
            Self::Mypy => "mypy",
            Self::Coverage => "coverage",
            Self::Wheelhouse => "wheelhouse",
            Self::CoverageReport => "coverage-report",
            Self::BuildDir => "build-dir",
        }
    }

    pub fn targets(self) -> Vec<ArtifactTarget> {
        let dir = |p: &str| ArtifactTarget::Directory(RelativePath::new(p));
        match self {
            Self::Dists => vec![dir("dist")],
            Self::Docs => vec![dir("docs_out")],
            Self::Tox => vec![dir(".tox")],
            Self::Mypy => vec![dir(".mypy_cache")],
            Self::Wheelhouse => vec![dir("wheelhouse")],
            Self::CoverageReport => vec![dir("htmlcov")],
            Self::BuildDir => vec![dir("build")],
            Self::Coverage => vec![ArtifactTarget::File(RelativePath::new(".coverage"))],
            Self::Compiled => COMPILED_SCAN_ROOTS
                .iter()
                .map(|p| ArtifactTarget::CompiledUnder(RelativePath::new(*p)))
                .collect(),
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true` for `*.pyc` files and `__pycache__` / `*.egg-info` directories.
pub fn is_compiled_artifact(path: &Path, is_dir: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if is_dir {
        name == "__pycache__" || name.ends_with(".egg-info")
    } else {
        name.ends_with(".pyc")
    }
}
