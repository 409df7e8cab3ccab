//! Output format for `talonctl` diagnostics on stderr.
//!
//! `talon_restart::telemetry::initialise` picks its subscriber layout from
//! [`Config::log_format`](crate::Config::log_format); stdout stays reserved
//! for command results in either format.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Layout of restart progress events written to stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened, for log shippers.
    Json,
    /// Single-line events for an operator watching a restart.
    #[default]
    Compact,
}

/// Error returned when `--log-format` or `TALON_LOG_FORMAT` names no format.
pub type LogFormatParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    fn parses_operator_spelling(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(input).expect("format should parse"), expected);
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(LogFormat::from_str("pretty").is_err());
    }
}
