//! `stencil bootstrap`: the post-generation hook.
//!
//! Resolves options from flags and configuration, wires the local adapters
//! into [`BootstrapService`], then reports each stage.

use std::sync::Arc;

use tracing::{debug, instrument};

use stencil_adapters::{LocalFilesystem, SystemInterpreter};
use stencil_core::{
    application::{BootstrapReport, BootstrapService},
    domain::{BootstrapOptions, EnvironmentOutcome, MissingPathPolicy},
    error::StencilError,
};

use crate::{
    cli::BootstrapArgs,
    commands::{best_effort, manifest_source, project_builder},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(root = %args.project.root.display()))]
pub fn execute(args: BootstrapArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = resolve_options(&args, &config)?;

    let policy = if args.strict || config.bootstrap.strict {
        MissingPathPolicy::Strict
    } else {
        MissingPathPolicy::Idempotent
    };
    let interpreter = args
        .interpreter
        .clone()
        .unwrap_or_else(|| config.bootstrap.interpreter.clone());

    let source = manifest_source(args.manifest.clone());
    debug!(manifest = %source.describe(), ?policy, %interpreter, "Bootstrap configured");
    let manifest = source.load()?;

    let service = BootstrapService::with_policy(
        Arc::new(LocalFilesystem::new()),
        Arc::new(SystemInterpreter::new(interpreter)),
        policy,
    );

    // Instructions are buffered so the spinner never interleaves with them.
    let spinner = options
        .create_venv()
        .then(|| output.spinner("Creating virtual environment..."));
    let mut instructions = Vec::new();
    let result = service.run(&args.project.root, &options, &manifest, &mut instructions);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    // Pruning and the environment are done; printing can no longer fail the hook.
    if output.is_json() {
        best_effort(output.json(&report), "bootstrap report");
        return Ok(());
    }

    report_stages(&report, &output);
    best_effort(
        output.emit(&String::from_utf8_lossy(&instructions)),
        "setup instructions",
    );
    Ok(())
}

/// Flags win over configuration; the builder fills the rest.
fn resolve_options(args: &BootstrapArgs, config: &AppConfig) -> CliResult<BootstrapOptions> {
    let venv_args = if args.venv_args.is_empty() {
        config.bootstrap.venv_args.clone()
    } else {
        args.venv_args.clone()
    };

    let options = project_builder(&args.project, config)?
        .create_docs(args.docs_flag().unwrap_or(config.bootstrap.create_docs))
        .create_venv(args.venv_flag().unwrap_or(config.bootstrap.create_venv))
        .venv_args(venv_args)
        .build()
        .map_err(StencilError::from)?;
    Ok(options)
}

fn report_stages(report: &BootstrapReport, output: &OutputManager) {
    if let Some(pruned) = &report.pruned {
        if !pruned.removed.is_empty() {
            best_effort(
                output.success(&format!("Removed docs ({} paths)", pruned.removed.len())),
                "prune summary",
            );
        }
        if !pruned.skipped.is_empty() {
            best_effort(
                output.info(&format!(
                    "{} docs paths were already absent",
                    pruned.skipped.len()
                )),
                "prune summary",
            );
        }
    }

    let environment = match &report.environment {
        EnvironmentOutcome::Created { path, interpreter } => output.success(&format!(
            "Created virtual environment at {} (Python {interpreter})",
            path.display()
        )),
        EnvironmentOutcome::Skipped { reason } => output.warning(&reason.to_string()),
        EnvironmentOutcome::Disabled => Ok(()),
    };
    best_effort(environment, "environment summary");
}
