//! Flags shared by every subcommand.
//!
//! A template generator runs the hooks with stdout captured, so colour is
//! decided by the terminal, not by a format switch. The only format choice
//! left is text or a JSON report.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` stages, `-vv` every removed path, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Only print errors and the command's own result.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output.
    ///
    /// `NO_COLOR` follows <https://no-color.org>: any value other than an
    /// empty string, `0`, `false`, `no` or `off` turns colour off.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        hide_env_values = true
    )]
    pub no_color: bool,

    /// Read configuration from FILE instead of the user config directory.
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of messages and instructions.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value_t = OutputFormat::Text
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Status lines and the setup instructions.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}
