//! Quit and launch commands for the host application.
//!
//! macOS drives the application through AppleScript and `open`. Other Unix
//! platforms signal the process with `pkill` and spawn the configured
//! executable directly, detached from the caller's process group.

use std::io;
use std::process::{Command, Stdio};

use camino::Utf8PathBuf;
use talon_config::Config;
use thiserror::Error;
use tracing::debug;

const CONTROL_TARGET: &str = "talon_restart::control";

/// Errors raised by quit and launch commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The command ran and reported failure.
    #[error("{program} exited with status {status}: {stderr}")]
    Failed {
        /// Program that failed.
        program: String,
        /// Exit status, or `-1` when terminated by a signal.
        status: i32,
        /// Trimmed standard error output.
        stderr: String,
    },
}

/// Issues lifecycle commands to the host application.
pub trait HostControl: Send + Sync {
    /// Asks the host to quit. Returns once the command has been issued, not
    /// once the process has exited.
    fn quit(&self) -> Result<(), CommandError>;

    /// Launches the host. Returns once the launch has been issued.
    fn launch(&self) -> Result<(), CommandError>;
}

/// Production [`HostControl`] backed by OS commands.
#[derive(Debug, Clone)]
pub struct SystemHostControl {
    app_name: String,
    app_path: Utf8PathBuf,
}

impl SystemHostControl {
    /// Builds a controller for the named application at `app_path`.
    #[must_use]
    pub fn new(app_name: impl Into<String>, app_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            app_name: app_name.into(),
            app_path: app_path.into(),
        }
    }

    /// Builds a controller for the configured host application.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_name(), config.app_path())
    }
}

impl HostControl for SystemHostControl {
    #[cfg(target_os = "macos")]
    fn quit(&self) -> Result<(), CommandError> {
        let script = format!("quit app \"{}\"", self.app_name);
        run_command("osascript", &["-e", &script])
    }

    #[cfg(not(target_os = "macos"))]
    fn quit(&self) -> Result<(), CommandError> {
        match run_command("pkill", &["-x", &self.app_name]) {
            // pkill reports 1 when nothing matched; the host is already gone.
            Err(CommandError::Failed { status: 1, .. }) => Ok(()),
            other => other,
        }
    }

    #[cfg(target_os = "macos")]
    fn launch(&self) -> Result<(), CommandError> {
        run_command("open", &[self.app_path.as_str()])
    }

    #[cfg(not(target_os = "macos"))]
    fn launch(&self) -> Result<(), CommandError> {
        spawn_detached(self.app_path.as_str())
    }
}

fn run_command(program: &str, args: &[&str]) -> Result<(), CommandError> {
    debug!(target: CONTROL_TARGET, program, ?args, "running host command");
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.to_owned(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    Err(CommandError::Failed {
        program: program.to_owned(),
        status: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    })
}

#[cfg(not(target_os = "macos"))]
fn spawn_detached(program: &str) -> Result<(), CommandError> {
    let mut command = Command::new(program);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command.spawn().map_err(|source| CommandError::Spawn {
        program: program.to_owned(),
        source,
    })?;
    debug!(target: CONTROL_TARGET, program, pid = child.id(), "host launched");
    Ok(())
}
