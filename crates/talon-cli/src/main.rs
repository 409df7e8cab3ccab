//! CLI entrypoint for the Talon restart tool.
//!
//! The binary delegates to [`talon_cli::run`], which loads configuration,
//! parses the subcommand and prints its JSON result.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    talon_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
