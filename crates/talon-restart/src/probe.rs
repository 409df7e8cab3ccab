//! Process-table queries for the host application.

use std::process::{Command, Stdio};

use talon_config::Config;
use tracing::debug;

const PROBE_TARGET: &str = "talon_restart::probe";

/// Answers whether the host application currently has a live process.
///
/// Implementations never fail: a query that cannot be answered is reported as
/// "not running".
pub trait ProcessProbe: Send + Sync {
    /// Returns `true` when a process with the host's exact name exists.
    fn is_running(&self) -> bool;
}

/// Probe backed by `pgrep -x <app_name>`.
#[derive(Debug, Clone)]
pub struct PgrepProbe {
    app_name: String,
}

impl PgrepProbe {
    /// Builds a probe matching `app_name` exactly.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Builds a probe for the configured host application.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_name())
    }
}

impl ProcessProbe for PgrepProbe {
    fn is_running(&self) -> bool {
        let output = Command::new("pgrep")
            .arg("-x")
            .arg(&self.app_name)
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(output) => output.status.success() && !output.stdout.trim_ascii().is_empty(),
            Err(error) => {
                debug!(
                    target: PROBE_TARGET,
                    app = %self.app_name,
                    %error,
                    "process query failed; treating host as stopped"
                );
                false
            }
        }
    }
}

impl<T> ProcessProbe for std::sync::Arc<T>
where
    T: ProcessProbe + ?Sized,
{
    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}
