//! `stencil config`: read configuration values.

use std::path::Path;

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit(&format!("{value}\n"))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.emit(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::display_path(config_file);
            output.emit(&format!("{}\n", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `bootstrap.interpreter`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let pointer = format!("/{}", key.replace('.', "/"));
    match tree.pointer(&pointer) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::Object(_)) | None => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
        Some(other) => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "bootstrap.interpreter").unwrap(),
            "python3"
        );
        assert_eq!(get_config_value(&cfg, "clean.marker").unwrap(), "tasks.py");
    }

    #[test]
    fn get_bool_and_list_keys() {
        let mut cfg = AppConfig::default();
        cfg.bootstrap.venv_args = vec!["--copies".into()];
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
        assert_eq!(
            get_config_value(&cfg, "bootstrap.venv_args").unwrap(),
            r#"["--copies"]"#
        );
    }

    #[test]
    fn unset_optional_key_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "github.username").unwrap(), "");
    }

    #[test]
    fn unknown_and_section_keys_are_errors() {
        let cfg = AppConfig::default();
        for key in ["does.not.exist", "bootstrap"] {
            assert!(matches!(
                get_config_value(&cfg, key),
                Err(CliError::ConfigError { .. })
            ));
        }
    }
}
