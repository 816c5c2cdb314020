//! Interpreter adapters.

mod system;

pub use system::SystemInterpreter;
