//! Structured reporting for restart state transitions.

use std::sync::Arc;

use crate::control::CommandError;
use crate::orchestrator::{RestartOutcome, RestartStage};
use crate::poll::PollOutcome;

const ORCHESTRATOR_TARGET: &str = "talon_restart::orchestrator";

/// Observer notified as the orchestrator moves through its stages.
pub trait RestartReporter: Send + Sync {
    /// Invoked when the orchestrator enters `stage`.
    fn stage_entered(&self, stage: RestartStage);

    /// Invoked when a bounded wait in `stage` ends.
    fn wait_finished(&self, stage: RestartStage, outcome: PollOutcome);

    /// Invoked when the quit or launch command fails.
    fn command_failed(&self, stage: RestartStage, error: &CommandError);

    /// Invoked once with the final outcome.
    fn restart_finished(&self, outcome: &RestartOutcome);
}

impl<T> RestartReporter for Arc<T>
where
    T: RestartReporter + ?Sized,
{
    fn stage_entered(&self, stage: RestartStage) {
        (**self).stage_entered(stage);
    }

    fn wait_finished(&self, stage: RestartStage, outcome: PollOutcome) {
        (**self).wait_finished(stage, outcome);
    }

    fn command_failed(&self, stage: RestartStage, error: &CommandError) {
        (**self).command_failed(stage, error);
    }

    fn restart_finished(&self, outcome: &RestartOutcome) {
        (**self).restart_finished(outcome);
    }
}

/// Default reporter that records transitions using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredRestartReporter;

impl StructuredRestartReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RestartReporter for StructuredRestartReporter {
    fn stage_entered(&self, stage: RestartStage) {
        tracing::info!(
            target: ORCHESTRATOR_TARGET,
            event = "stage_entered",
            stage = %stage,
            "entering restart stage"
        );
    }

    fn wait_finished(&self, stage: RestartStage, outcome: PollOutcome) {
        if outcome.is_satisfied() {
            tracing::info!(
                target: ORCHESTRATOR_TARGET,
                event = "wait_satisfied",
                stage = %stage,
                elapsed_ms = outcome.elapsed_ms(),
                "wait completed"
            );
        } else {
            tracing::warn!(
                target: ORCHESTRATOR_TARGET,
                event = "wait_timed_out",
                stage = %stage,
                elapsed_ms = outcome.elapsed_ms(),
                "wait timed out"
            );
        }
    }

    fn command_failed(&self, stage: RestartStage, error: &CommandError) {
        tracing::error!(
            target: ORCHESTRATOR_TARGET,
            event = "command_failed",
            stage = %stage,
            error = %error,
            "host command failed"
        );
    }

    fn restart_finished(&self, outcome: &RestartOutcome) {
        let errors = outcome
            .diagnostics
            .as_ref()
            .map_or(0, |diagnostics| diagnostics.startup.error_count);
        tracing::info!(
            target: ORCHESTRATOR_TARGET,
            event = "restart_finished",
            success = outcome.success,
            errors,
            total_ms = ?outcome.timing.map(|timing| timing.total_ms),
            message = %outcome.message,
            "restart cycle finished"
        );
    }
}
