//! `stencil clean`: remove build and cache artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::{CleanService, locate_project_root},
    domain::ArtifactCategory,
};

use crate::{
    cli::{CleanArgs, CleanCategory},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: CleanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let filesystem = LocalFilesystem::new();

    let root: PathBuf = match args.root {
        Some(root) => root,
        None => {
            let cwd = std::env::current_dir()
                .with_cli_context(|| "reading the current directory")?;
            locate_project_root(&filesystem, &cwd, &config.clean.marker)?
        }
    };
    info!(root = %root.display(), "Cleaning project");

    let categories = selected_categories(&args.skip);
    let report = CleanService::new(Arc::new(filesystem)).clean(&root, &categories)?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    for path in &report.removed {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        output.print(&format!("  removed {}", shown.display()))?;
    }
    output.success(&format!(
        "Cleaned {} ({} removed, {} already absent)",
        root.display(),
        report.removed.len(),
        report.skipped.len()
    ))?;
    Ok(())
}

/// Every category except the skipped ones, in canonical order.
fn selected_categories(skip: &[CleanCategory]) -> Vec<ArtifactCategory> {
    let skipped: Vec<ArtifactCategory> = skip.iter().copied().map(Into::into).collect();
    ArtifactCategory::ALL
        .into_iter()
        .filter(|c| !skipped.contains(c))
        .collect()
}
