//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File removal and inspection
//!   - `Interpreter`: Version probe and environment creation
//!   - `ManifestSource`: Where removal manifests come from
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, Interpreter, ManifestSource, WalkEntry};

#[cfg(test)]
pub use output::{MockFilesystem, MockInterpreter};
