pub mod artifacts;
pub mod common;
pub mod environment;
pub mod instructions;
pub mod manifest;
pub mod options;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use manifest::RemovalManifest;
pub use options::BootstrapOptions;
