//! Subcommand execution.

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use serde::Serialize;
use talon_config::Config;
use talon_restart::{
    LogTailer, PgrepProbe, ProcessProbe, RestartOrchestrator, RestartSettings, SystemHostControl,
    parse_startup_log, read_from, signal_from_config,
};
use tracing::info;

use crate::cli::CliCommand;
use crate::errors::AppError;
use crate::lock::RestartLock;

const COMMAND_TARGET: &str = "talon_cli::command";

#[derive(Debug, Serialize)]
struct StatusReport {
    success: bool,
    status: ProcessStatus,
}

#[derive(Debug, Serialize)]
struct ProcessStatus {
    running: bool,
}

pub(crate) fn execute<W: Write>(
    command: CliCommand,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    match command {
        CliCommand::Restart => restart(config, stdout),
        CliCommand::Status => {
            let running = PgrepProbe::from_config(config).is_running();
            let report = StatusReport {
                success: true,
                status: ProcessStatus { running },
            };
            emit(stdout, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Diagnose { from_offset, path } => {
            diagnose(config, path, from_offset, stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Paths => {
            emit(stdout, &config.paths())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn restart<W: Write>(config: &Config, stdout: &mut W) -> Result<ExitCode, AppError> {
    let _lock = RestartLock::acquire(&config.home())?;
    info!(
        target: COMMAND_TARGET,
        app = config.app_name(),
        readiness = %config.readiness(),
        "restarting host"
    );
    let orchestrator = RestartOrchestrator::new(
        SystemHostControl::from_config(config),
        PgrepProbe::from_config(config),
        signal_from_config(config),
        LogTailer::new(config.log_path()),
        RestartSettings::from(config),
    );
    let outcome = orchestrator.restart();
    emit(stdout, &outcome)?;
    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn diagnose<W: Write>(
    config: &Config,
    path: Option<Utf8PathBuf>,
    from_offset: u64,
    stdout: &mut W,
) -> Result<(), AppError> {
    let path = path.unwrap_or_else(|| config.log_path());
    let diagnostics = parse_startup_log(&read_from(&path, from_offset));
    info!(
        target: COMMAND_TARGET,
        file = %path,
        offset = from_offset,
        errors = diagnostics.error_count,
        warnings = diagnostics.warning_count,
        "parsed startup log"
    );
    emit(stdout, &diagnostics)
}

fn emit<W: Write, T: Serialize>(stdout: &mut W, value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(AppError::Serialise)?;
    writeln!(stdout, "{rendered}").map_err(AppError::Emit)
}
