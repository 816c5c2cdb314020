//! `stencil manifest`: inspect removal manifests.

use stencil_adapters::manifest_to_toml;

use crate::{
    cli::ManifestCommands,
    commands::manifest_source,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ManifestCommands, output: OutputManager) -> CliResult<()> {
    match cmd {
        ManifestCommands::Show { file } => {
            let source = manifest_source(file);
            let manifest = source.load()?;

            if output.is_json() {
                output.json(&manifest)?;
            } else {
                let rendered = format!("# {}\n{}", source.describe(), manifest_to_toml(&manifest)?);
                output
                    .emit(&rendered)
                    .with_cli_context(|| "printing manifest")?;
            }
        }
    }
    Ok(())
}
