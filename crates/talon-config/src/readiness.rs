use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Mechanism used to decide that the host finished launching.
///
/// Exactly one strategy is active per deployment; the orchestrator treats all
/// of them identically.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReadinessStrategy {
    /// Wait for the ready marker line to be appended to the host log.
    LogMarker,
    /// Wait for the marker file to be rewritten with a new timestamp.
    #[default]
    TimestampFile,
    /// Wait for the embedded REPL to evaluate a trivial expression.
    ReplProbe,
}

/// Errors encountered while parsing a [`ReadinessStrategy`] from text.
pub type ReadinessStrategyParseError = strum::ParseError;
