//! Structured health report mined from one startup's log window.
//!
//! [`parse_startup_log`] is a pure, total function: any text, including the
//! empty string, yields a [`StartupDiagnostics`].

mod parser;

#[cfg(test)]
mod tests;

use serde::Serialize;
use strum::Display;

pub use parser::parse_startup_log;

/// Category of a startup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StartupErrorKind {
    /// A command script failed to parse.
    Parse,
    /// An event callback raised an exception.
    Callback,
    /// Any other logged error.
    Other,
}

/// Category of a startup warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StartupWarningKind {
    /// `SyntaxWarning` raised while loading a script.
    Syntax,
    /// `DeprecationWarning` raised while loading a script.
    Deprecation,
    /// Any other logged warning.
    Other,
}

/// One distinguishable failure surfaced during startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupError {
    /// Error category.
    pub kind: StartupErrorKind,
    /// Script the error was attributed to, when the log names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// One warning surfaced during startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupWarning {
    /// Warning category.
    pub kind: StartupWarningKind,
    /// Script the warning was attributed to, when the log names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Line within `source_file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Human-readable description.
    pub message: String,
}

/// Errors, warnings and subsystem activation observed in one startup.
///
/// `error_count` and `warning_count` come from the host's summary lines when
/// present and may exceed the itemised list lengths, since the log can
/// truncate the itemised output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupDiagnostics {
    /// Number of startup errors.
    pub error_count: usize,
    /// Number of startup warnings.
    pub warning_count: usize,
    /// Itemised errors in log order.
    pub errors: Vec<StartupError>,
    /// Itemised warnings in log order.
    pub warnings: Vec<StartupWarning>,
    /// The speech engine announced its activation.
    pub speech_engine_active: bool,
    /// The microphone announced its activation.
    pub microphone_active: bool,
}

impl StartupDiagnostics {
    /// Whether the startup logged no errors.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}
