//! `stencil instructions`: print the setup block for an existing project.

use std::sync::Arc;

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::{ApplicationError, InstructionEmitter, ports::Filesystem},
    domain::VENV_DIR,
    error::StencilError,
};

use crate::{
    cli::InstructionsArgs,
    commands::{best_effort, project_builder},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: InstructionsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.project.root.as_path();
    let filesystem = Arc::new(LocalFilesystem::new());
    if !filesystem.is_dir(root) {
        return Err(StencilError::from(ApplicationError::RootNotADirectory {
            path: root.to_path_buf(),
        })
        .into());
    }

    let options = project_builder(&args.project, &config)?
        .build()
        .map_err(StencilError::from)?;

    let venv_ready = filesystem.is_dir(&root.join(VENV_DIR));
    let instructions = InstructionEmitter::new(filesystem).prepare(root, &options, venv_ready);

    if output.is_json() {
        best_effort(output.json(&instructions), "setup instructions");
    } else {
        best_effort(output.emit(&instructions.to_string()), "setup instructions");
    }
    Ok(())
}
