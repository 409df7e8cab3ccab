//! Result surface of a restart cycle.

use serde::Serialize;

use crate::diagnostics::StartupDiagnostics;

/// Milliseconds spent in each wait, plus the cycle total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartTiming {
    /// Time waiting for the old process to exit.
    pub exit_wait_ms: u64,
    /// Time waiting for the relaunched host to become ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_wait_ms: Option<u64>,
    /// Time waiting for speech confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_confirm_ms: Option<u64>,
    /// Wall-clock time for the whole cycle.
    pub total_ms: u64,
}

/// Startup diagnostics extended with the speech confirmation result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartDiagnostics {
    /// Findings parsed from the startup log window.
    #[serde(flatten)]
    pub startup: StartupDiagnostics,
    /// The speech marker appeared before the confirmation deadline.
    pub speech_detected: bool,
}

/// Outcome of one restart cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartOutcome {
    /// The host became ready and logged no startup errors.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Raw error text from a failed quit or launch command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stage timings, absent when the cycle failed before any wait.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<RestartTiming>,
    /// Startup findings, present only when the host became ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<RestartDiagnostics>,
}

impl RestartOutcome {
    pub(crate) fn failure(
        message: &str,
        error: Option<String>,
        timing: Option<RestartTiming>,
    ) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            error,
            timing,
            diagnostics: None,
        }
    }

    pub(crate) fn completed(timing: RestartTiming, diagnostics: RestartDiagnostics) -> Self {
        Self {
            success: diagnostics.startup.is_clean(),
            message: compose_message(&diagnostics),
            error: None,
            timing: Some(timing),
            diagnostics: Some(diagnostics),
        }
    }
}

/// Builds the summary for a cycle in which the host became ready.
#[must_use]
pub fn compose_message(diagnostics: &RestartDiagnostics) -> String {
    let startup = &diagnostics.startup;
    let mut message = String::from("Talon restarted");

    if startup.error_count > 0 {
        message.push_str(&format!(" with {} error(s)", startup.error_count));
    }
    if startup.warning_count > 0 {
        // Without an error clause there is nothing to join, so "with" opens it.
        let joiner = if startup.error_count > 0 { "and" } else { "with" };
        message.push_str(&format!(" {joiner} {} warning(s)", startup.warning_count));
    }

    if diagnostics.speech_detected {
        message.push_str(", speech recognition confirmed");
    } else if startup.speech_engine_active && startup.microphone_active {
        message.push_str(", engine and microphone active (no speech detected yet)");
    }
    message
}
