//! `stencil validate`: the pre-generation hook.
//!
//! Runs before the renderer writes anything. A non-zero exit aborts
//! generation.

use serde_json::json;
use tracing::instrument;

use stencil_core::{domain::InputValidator, error::StencilError};

use crate::{cli::ValidateArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(project = %args.project_name, module = %args.module_name))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let inputs = InputValidator::validate(&args.project_name, &args.module_name)
        .map_err(StencilError::from)?;

    if output.is_json() {
        output.json(&json!({
            "project_name": inputs.project_name,
            "module_name": inputs.module_name,
            "valid": true,
        }))?;
    } else {
        output.success(&format!(
            "project_name '{}' and module_name '{}' are valid",
            inputs.project_name, inputs.module_name
        ))?;
    }
    Ok(())
}
