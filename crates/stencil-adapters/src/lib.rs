//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod interpreter;
pub mod manifest;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use interpreter::SystemInterpreter;
pub use manifest::{BuiltinManifest, TomlManifestFile, manifest_to_toml};
