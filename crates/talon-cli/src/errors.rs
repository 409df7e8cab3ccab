//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::lock::RestartLockError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] talon_restart::telemetry::TelemetryError),
    #[error(transparent)]
    Lock(#[from] RestartLockError),
    #[error("failed to serialise command output: {0}")]
    Serialise(#[source] serde_json::Error),
    #[error("failed to write command output: {0}")]
    Emit(#[source] io::Error),
}
