//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! template hooks: the checks that run before a project template is rendered
//! and the bootstrap procedure that runs right after.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │   (validate / bootstrap / clean hooks)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (BootstrapService, TreePruner, ...)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Interpreter, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │ (LocalFilesystem, SystemInterpreter)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectName, RemovalManifest, Options) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//!
//! Validate → Render (external) → Prune → Bootstrap-Env → Emit-Instructions.
//! A fatal failure in one stage halts the stages after it; non-fatal
//! conditions (an unsupported interpreter) are logged and the run continues.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stencil_core::{
//!     application::BootstrapService,
//!     domain::{BootstrapOptions, RemovalManifest},
//! };
//!
//! let options = BootstrapOptions::builder()
//!     .project_name("my-project").unwrap()
//!     .create_docs(false)
//!     .build()
//!     .unwrap();
//!
//! let service = BootstrapService::new(filesystem, interpreter);
//! let report = service
//!     .run("./my-project".as_ref(), &options, &RemovalManifest::docs(), &mut std::io::stdout())
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BootstrapReport, BootstrapService, CleanService, EnvironmentBootstrapper,
        InstructionEmitter, TreePruner,
        ports::{Filesystem, Interpreter, ManifestSource},
    };
    pub use crate::domain::{
        ArtifactCategory, BootstrapOptions, EnvironmentOutcome, InputValidator,
        InterpreterVersion, MissingPathPolicy, ModuleName, ProjectName, PruneReport,
        RelativePath, RemovalManifest, SetupInstructions,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
