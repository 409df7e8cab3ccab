//! Restart-and-diagnose orchestration for the Talon voice-control host.
//!
//! The crate stops the host application, relaunches it, waits until it is
//! operational and mines the startup log into a [`StartupDiagnostics`]
//! report. The host is only ever observed through external signals: the
//! process table, its log file, a marker file and its REPL.
//!
//! [`RestartOrchestrator`] sequences the stages; every seam it depends on is
//! a trait so tests can substitute deterministic fakes:
//!
//! - [`ProcessProbe`] answers "is the host running?".
//! - [`HostControl`] issues the quit and launch commands.
//! - [`ReadinessSignal`] decides when a relaunch has completed.
//! - [`RestartReporter`] observes each state transition.

pub mod control;
pub mod diagnostics;
pub mod orchestrator;
pub mod poll;
pub mod probe;
pub mod readiness;
pub mod tail;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use control::{CommandError, HostControl, SystemHostControl};
pub use diagnostics::{
    StartupDiagnostics, StartupError, StartupErrorKind, StartupWarning, StartupWarningKind,
    parse_startup_log,
};
pub use orchestrator::{
    RestartDiagnostics, RestartOrchestrator, RestartOutcome, RestartReporter, RestartSettings,
    RestartStage, RestartTiming, StructuredRestartReporter,
};
pub use poll::{PollOutcome, poll_until};
pub use probe::{PgrepProbe, ProcessProbe};
pub use readiness::{
    LogMarkerSignal, ReadinessSignal, ReplProbeSignal, TimestampFileSignal, signal_from_config,
};
pub use tail::{Cursor, LogTailer, read_from, size_of};
