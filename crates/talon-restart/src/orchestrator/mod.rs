//! The restart state machine.
//!
//! ```text
//! Idle → Quitting → AwaitingExit → Relaunching → AwaitingReady
//!      → Diagnosing → AwaitingSpeechConfirm → Done
//! ```
//!
//! The log [`Cursor`] is captured before the quit command is issued, so every
//! later read covers exactly the output of the relaunched host. Command
//! failures and the exit and readiness deadlines end the cycle early; the
//! speech confirmation deadline does not. No stage is retried and a failed
//! relaunch leaves the host stopped.

mod outcome;
mod reporter;


use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use strum::Display;
use talon_config::Config;

pub use outcome::{RestartDiagnostics, RestartOutcome, RestartTiming, compose_message};
pub use reporter::{RestartReporter, StructuredRestartReporter};

use crate::control::HostControl;
use crate::diagnostics::parse_startup_log;
use crate::poll::{PollOutcome, duration_ms, poll_until};
use crate::probe::ProcessProbe;
use crate::readiness::ReadinessSignal;
use crate::tail::{Cursor, LogTailer};

/// States of a restart cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RestartStage {
    /// Capturing the cursor.
    Idle,
    /// Issuing the quit command.
    Quitting,
    /// Waiting for the old process to disappear.
    AwaitingExit,
    /// Settling, then issuing the launch command.
    Relaunching,
    /// Waiting for the readiness signal.
    AwaitingReady,
    /// Parsing the startup log window.
    Diagnosing,
    /// Waiting for the speech marker.
    AwaitingSpeechConfirm,
    /// Assembling the outcome.
    Done,
}

/// Intervals, deadlines and markers for one restart cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartSettings {
    /// Interval between polls in every wait.
    pub poll_interval: Duration,
    /// Pause between the old process exiting and the launch command.
    pub settle_delay: Duration,
    /// Deadline for the old process to exit.
    pub exit_timeout: Duration,
    /// Deadline for the readiness signal.
    pub ready_timeout: Duration,
    /// Deadline for speech confirmation.
    pub speech_timeout: Duration,
    /// Log line confirming recognised speech.
    pub speech_marker: String,
}

impl From<&Config> for RestartSettings {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            settle_delay: config.settle_delay(),
            exit_timeout: config.exit_timeout(),
            ready_timeout: config.ready_timeout(),
            speech_timeout: config.speech_timeout(),
            speech_marker: config.speech_marker().to_owned(),
        }
    }
}

impl Default for RestartSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Sequences quit, relaunch, readiness and diagnosis for the host.
pub struct RestartOrchestrator<C, P> {
    control: C,
    probe: P,
    readiness: Box<dyn ReadinessSignal>,
    log: LogTailer,
    settings: RestartSettings,
    reporter: Arc<dyn RestartReporter>,
}

impl<C, P> RestartOrchestrator<C, P>
where
    C: HostControl,
    P: ProcessProbe,
{
    /// Builds an orchestrator reporting through [`StructuredRestartReporter`].
    #[must_use]
    pub fn new(
        control: C,
        probe: P,
        readiness: Box<dyn ReadinessSignal>,
        log: LogTailer,
        settings: RestartSettings,
    ) -> Self {
        Self {
            control,
            probe,
            readiness,
            log,
            settings,
            reporter: Arc::new(StructuredRestartReporter::new()),
        }
    }

    /// Replaces the transition reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn RestartReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Runs one restart cycle. Never panics and never returns an error: every
    /// failure is described by the returned outcome.
    pub fn restart(&self) -> RestartOutcome {
        let outcome = self.run(Instant::now());
        self.reporter.restart_finished(&outcome);
        outcome
    }

    fn run(&self, started: Instant) -> RestartOutcome {
        self.reporter.stage_entered(RestartStage::Idle);
        let cursor = Cursor {
            offset: self.log.size(),
            baseline: self.readiness.baseline(),
        };

        self.reporter.stage_entered(RestartStage::Quitting);
        if let Err(error) = self.control.quit() {
            self.reporter.command_failed(RestartStage::Quitting, &error);
            return RestartOutcome::failure("Failed to quit Talon", Some(error.to_string()), None);
        }

        let exit = self.wait(RestartStage::AwaitingExit, self.settings.exit_timeout, || {
            !self.probe.is_running()
        });
        let exit_wait_ms = exit.elapsed_ms();
        if !exit.is_satisfied() {
            return RestartOutcome::failure(
                "Talon did not exit within timeout",
                None,
                Some(partial_timing(exit_wait_ms, None, started)),
            );
        }

        self.reporter.stage_entered(RestartStage::Relaunching);
        thread::sleep(self.settings.settle_delay);
        if let Err(error) = self.control.launch() {
            self.reporter
                .command_failed(RestartStage::Relaunching, &error);
            return RestartOutcome::failure(
                "Failed to relaunch Talon",
                Some(error.to_string()),
                Some(partial_timing(exit_wait_ms, None, started)),
            );
        }

        let ready = self.wait(RestartStage::AwaitingReady, self.settings.ready_timeout, || {
            self.readiness.check_ready(&cursor)
        });
        if !ready.is_satisfied() {
            return RestartOutcome::failure(
                "Talon launched but did not become ready within timeout",
                None,
                Some(partial_timing(exit_wait_ms, Some(ready.elapsed_ms()), started)),
            );
        }

        self.reporter.stage_entered(RestartStage::Diagnosing);
        let startup = parse_startup_log(&self.log.read_from(cursor.offset));

        let speech = self.wait(
            RestartStage::AwaitingSpeechConfirm,
            self.settings.speech_timeout,
            || self.speech_detected(cursor.offset),
        );

        self.reporter.stage_entered(RestartStage::Done);
        let timing = RestartTiming {
            exit_wait_ms,
            ready_wait_ms: Some(ready.elapsed_ms()),
            speech_confirm_ms: Some(speech.elapsed_ms()),
            total_ms: duration_ms(started.elapsed()),
        };
        RestartOutcome::completed(
            timing,
            RestartDiagnostics {
                startup,
                speech_detected: speech.is_satisfied(),
            },
        )
    }

    fn wait<F>(&self, stage: RestartStage, timeout: Duration, predicate: F) -> PollOutcome
    where
        F: FnMut() -> bool,
    {
        self.reporter.stage_entered(stage);
        let outcome = poll_until(self.settings.poll_interval, timeout, predicate);
        self.reporter.wait_finished(stage, outcome);
        outcome
    }

    fn speech_detected(&self, offset: u64) -> bool {
        self.log
            .read_from(offset)
            .lines()
            .any(|line| line.contains(self.settings.speech_marker.as_str()))
    }
}

fn partial_timing(exit_wait_ms: u64, ready_wait_ms: Option<u64>, started: Instant) -> RestartTiming {
    RestartTiming {
        exit_wait_ms,
        ready_wait_ms,
        speech_confirm_ms: None,
        total_ms: duration_ms(started.elapsed()),
    }
}
