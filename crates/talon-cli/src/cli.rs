//! CLI argument definitions for `talonctl`.
//!
//! Configuration flags are stripped before this parser runs, so the parser
//! only sees the subcommand and its own arguments.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for restarting and inspecting Talon.
#[derive(Parser, Debug)]
#[command(name = "talonctl", disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operator subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Quits Talon, relaunches it and reports startup diagnostics.
    Restart,
    /// Reports whether the Talon process is running.
    Status,
    /// Parses a Talon log and prints the startup diagnostics.
    Diagnose {
        /// Byte offset to start reading from.
        #[arg(long, default_value_t = 0)]
        from_offset: u64,
        /// Log file to parse. Defaults to the configured log path.
        #[arg(value_name = "PATH")]
        path: Option<Utf8PathBuf>,
    },
    /// Prints the resolved Talon paths.
    Paths,
}
