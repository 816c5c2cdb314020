//! Removal manifest sources.
//!
//! The built-in manifest covers the documentation subtree. A TOML file can
//! replace it for templates that ship a different layout:
//!
//! ```toml
//! files = ["docs/conf.py", "docs/index.rst"]
//! directories = ["docs/_static"]
//! enclosing = "docs"
//! ```

use std::path::{Path, PathBuf};

use stencil_core::{
    application::{ApplicationError, ports::ManifestSource},
    domain::{InputValidator, RemovalManifest},
    error::{StencilError, StencilResult},
};
use tracing::{debug, instrument};

/// The compiled-in docs manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinManifest;

impl ManifestSource for BuiltinManifest {
    fn load(&self) -> StencilResult<RemovalManifest> {
        Ok(RemovalManifest::docs())
    }

    fn describe(&self) -> String {
        "built-in docs manifest".into()
    }
}

/// A manifest read from a TOML file.
#[derive(Debug, Clone)]
pub struct TomlManifestFile {
    path: PathBuf,
}

impl TomlManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_error(&self, reason: impl ToString) -> ApplicationError {
        ApplicationError::ManifestLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ManifestSource for TomlManifestFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> StencilResult<RemovalManifest> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| self.load_error(e))?;
        // Absolute or escaping paths are rejected while deserializing.
        let manifest: RemovalManifest = toml::from_str(&raw).map_err(|e| self.load_error(e))?;
        InputValidator::validate_manifest(&manifest)?;

        debug!(entries = manifest.len(), "Manifest loaded");
        Ok(manifest)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Render a manifest in the same TOML shape `TomlManifestFile` reads.
pub fn manifest_to_toml(manifest: &RemovalManifest) -> StencilResult<String> {
    toml::to_string_pretty(manifest).map_err(|e| StencilError::Internal {
        message: format!("Failed to serialize manifest: {e}"),
    })
}
