//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Pipeline stages (TreePruner, EnvironmentBootstrapper, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules of its own. Name and path rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BootstrapReport, BootstrapService, CleanService, DEFAULT_ROOT_MARKER,
    EnvironmentBootstrapper, InstructionEmitter, TreePruner, locate_project_root,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Interpreter, ManifestSource, WalkEntry};

pub use error::ApplicationError;
