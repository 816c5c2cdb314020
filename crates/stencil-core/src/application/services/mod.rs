//! Application services - orchestrate use cases.
//!
//! Each stage of the post-generation pipeline is its own service;
//! `BootstrapService` chains them.

pub mod bootstrap_service;
pub mod clean_service;
pub mod environment_service;
pub mod instruction_service;
pub mod prune_service;
pub mod root_locator;

pub use bootstrap_service::{BootstrapReport, BootstrapService};
pub use clean_service::CleanService;
pub use environment_service::EnvironmentBootstrapper;
pub use instruction_service::InstructionEmitter;
pub use prune_service::TreePruner;
pub use root_locator::{DEFAULT_ROOT_MARKER, locate_project_root};
