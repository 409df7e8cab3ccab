//! Shared configuration for the Talon restart tooling.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an optional
//! configuration file (`--config-path`), then `TALON_*` environment variables,
//! then command-line flags. Every field is optional on the wire so that
//! unspecified values fall through to the defaults in [`defaults`]; use the
//! accessor methods rather than reading fields directly.

use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub mod defaults;
mod logging;
mod paths;
mod readiness;

pub use defaults::{
    DEFAULT_APP_NAME, DEFAULT_APP_PATH, DEFAULT_LOG_FILTER, DEFAULT_READY_MARKER,
    DEFAULT_SPEECH_MARKER, default_log_filter, default_log_format, default_talon_home,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use paths::TalonPaths;
pub use readiness::{ReadinessStrategy, ReadinessStrategyParseError};

/// Configuration consumed by the CLI and the restart orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TALON")]
pub struct Config {
    /// Talon home directory (`~/.talon` when unset).
    pub home: Option<Utf8PathBuf>,
    /// Host log file (`<home>/talon.log` when unset).
    pub log_path: Option<Utf8PathBuf>,
    /// Talon REPL executable used by the REPL readiness probe.
    pub repl_path: Option<Utf8PathBuf>,
    /// Process name matched exactly when probing and quitting the host.
    pub app_name: Option<String>,
    /// Application bundle or executable launched on restart.
    pub app_path: Option<Utf8PathBuf>,
    /// Readiness detection strategy.
    pub readiness: Option<ReadinessStrategy>,
    /// Log line announcing launch completion (log-marker strategy).
    pub ready_marker: Option<String>,
    /// Marker file rewritten with a timestamp on launch completion.
    pub marker_file: Option<Utf8PathBuf>,
    /// Log line confirming that speech was recognised.
    pub speech_marker: Option<String>,
    /// Interval between polls in milliseconds.
    pub poll_interval_ms: Option<u64>,
    /// Delay between the host exiting and the relaunch, in milliseconds.
    pub settle_delay_ms: Option<u64>,
    /// Deadline for the host to exit, in milliseconds.
    pub exit_timeout_ms: Option<u64>,
    /// Deadline for the host to report readiness, in milliseconds.
    pub ready_timeout_ms: Option<u64>,
    /// Deadline for speech confirmation, in milliseconds.
    pub speech_timeout_ms: Option<u64>,
    /// `tracing` filter expression.
    pub log_filter: Option<String>,
    /// Log output format.
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    pub fn load_from_args<I>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
    }

    /// Talon home directory.
    #[must_use]
    pub fn home(&self) -> Utf8PathBuf {
        self.home.clone().unwrap_or_else(default_talon_home)
    }

    /// Host log file.
    #[must_use]
    pub fn log_path(&self) -> Utf8PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.home().join("talon.log"))
    }

    /// Talon REPL executable.
    #[must_use]
    pub fn repl_path(&self) -> Utf8PathBuf {
        self.repl_path
            .clone()
            .unwrap_or_else(|| self.home().join(".venv").join("bin").join("repl"))
    }

    /// Process name of the host application.
    #[must_use]
    pub fn app_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Launch target of the host application.
    #[must_use]
    pub fn app_path(&self) -> Utf8PathBuf {
        self.app_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_APP_PATH))
    }

    /// Active readiness strategy.
    #[must_use]
    pub fn readiness(&self) -> ReadinessStrategy {
        self.readiness.unwrap_or_default()
    }

    /// Log line announcing launch completion.
    #[must_use]
    pub fn ready_marker(&self) -> &str {
        self.ready_marker.as_deref().unwrap_or(DEFAULT_READY_MARKER)
    }

    /// Timestamp marker file.
    #[must_use]
    pub fn marker_file(&self) -> Utf8PathBuf {
        self.marker_file
            .clone()
            .unwrap_or_else(|| self.home().join(".startup_timestamp"))
    }

    /// Log line confirming recognised speech.
    #[must_use]
    pub fn speech_marker(&self) -> &str {
        self.speech_marker
            .as_deref()
            .unwrap_or(DEFAULT_SPEECH_MARKER)
    }

    /// Interval between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        millis_or(self.poll_interval_ms, defaults::POLL_INTERVAL)
    }

    /// Delay between exit and relaunch.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        millis_or(self.settle_delay_ms, defaults::SETTLE_DELAY)
    }

    /// Exit deadline.
    #[must_use]
    pub fn exit_timeout(&self) -> Duration {
        millis_or(self.exit_timeout_ms, defaults::EXIT_TIMEOUT)
    }

    /// Readiness deadline.
    #[must_use]
    pub fn ready_timeout(&self) -> Duration {
        millis_or(self.ready_timeout_ms, defaults::READY_TIMEOUT)
    }

    /// Speech confirmation deadline.
    #[must_use]
    pub fn speech_timeout(&self) -> Duration {
        millis_or(self.speech_timeout_ms, defaults::SPEECH_TIMEOUT)
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Resolved Talon paths reported to operators.
    #[must_use]
    pub fn paths(&self) -> TalonPaths {
        TalonPaths::from_config(self)
    }
}

fn millis_or(value: Option<u64>, fallback: Duration) -> Duration {
    value.map_or(fallback, Duration::from_millis)
}
