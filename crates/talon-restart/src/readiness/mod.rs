//! Launch-completion detection.
//!
//! A relaunched host has a live process long before it accepts input. A
//! [`ReadinessSignal`] watches for the observable side effect that marks the
//! end of the launch sequence. Exactly one signal is active per deployment and
//! the orchestrator treats them interchangeably.

mod log_marker;
mod repl_probe;
mod timestamp_file;


use talon_config::{Config, ReadinessStrategy};

pub use log_marker::LogMarkerSignal;
pub use repl_probe::ReplProbeSignal;
pub use timestamp_file::TimestampFileSignal;

use crate::tail::{Cursor, LogTailer};

/// Decides whether the host has finished launching.
pub trait ReadinessSignal: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Observation recorded in the [`Cursor`] before the host is stopped.
    ///
    /// Signals that detect change rather than presence return the current
    /// state here; the default records nothing.
    fn baseline(&self) -> Option<String> {
        None
    }

    /// Returns `true` once the signal shows the launch has completed since
    /// `cursor` was captured.
    fn check_ready(&self, cursor: &Cursor) -> bool;
}

impl<T> ReadinessSignal for Box<T>
where
    T: ReadinessSignal + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn baseline(&self) -> Option<String> {
        (**self).baseline()
    }

    fn check_ready(&self, cursor: &Cursor) -> bool {
        (**self).check_ready(cursor)
    }
}

/// Builds the signal selected by the configured readiness strategy.
#[must_use]
pub fn signal_from_config(config: &Config) -> Box<dyn ReadinessSignal> {
    match config.readiness() {
        ReadinessStrategy::LogMarker => Box::new(LogMarkerSignal::new(
            LogTailer::new(config.log_path()),
            config.ready_marker(),
        )),
        ReadinessStrategy::TimestampFile => Box::new(TimestampFileSignal::new(config.marker_file())),
        ReadinessStrategy::ReplProbe => Box::new(ReplProbeSignal::new(config.repl_path())),
    }
}
