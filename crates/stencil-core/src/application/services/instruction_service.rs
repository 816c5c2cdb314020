//! Instruction Emitter - prints the manual next steps.
//!
//! Informational only. Nothing here can fail the run: a directory listing
//! error falls back to `git add .`, and a write error is logged.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    application::ports::Filesystem,
    domain::{BootstrapOptions, SetupInstructions, VENV_DIR},
};

pub struct InstructionEmitter {
    filesystem: Arc<dyn Filesystem>,
}

impl InstructionEmitter {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Build the instructions for the project at `root`.
    pub fn prepare(
        &self,
        root: &Path,
        options: &BootstrapOptions,
        venv_ready: bool,
    ) -> SetupInstructions {
        let entries = match self.filesystem.list_dir(root) {
            Ok(mut names) => {
                names.retain(|n| n != VENV_DIR);
                names.sort();
                names
            }
            Err(e) => {
                debug!(error = %e, "Could not list project root; staging everything");
                Vec::new()
            }
        };
        SetupInstructions::new(options, &entries, venv_ready)
    }

    /// Write `instructions` to `out`.
    pub fn emit(&self, instructions: &SetupInstructions, out: &mut dyn Write) {
        if let Err(e) = write!(out, "{instructions}").and_then(|()| out.flush()) {
            warn!(error = %e, "Could not print setup instructions");
        }
    }
}
