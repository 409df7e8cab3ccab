use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use tracing::debug;

use crate::readiness::ReadinessSignal;
use crate::tail::Cursor;

const REPL_TARGET: &str = "talon_restart::readiness::repl";

/// Upper bound on a single probe.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const WAIT_INTERVAL: Duration = Duration::from_millis(50);

const PROBE_INPUT: &[u8] = b"print(\"ready\")\n";

/// Ready once the host's REPL evaluates a trivial expression successfully.
#[derive(Debug, Clone)]
pub struct ReplProbeSignal {
    repl_path: Utf8PathBuf,
    probe_timeout: Duration,
}

impl ReplProbeSignal {
    /// Probes the REPL executable at `repl_path`.
    #[must_use]
    pub fn new(repl_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            repl_path: repl_path.into(),
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    /// Overrides the per-probe timeout.
    #[must_use]
    pub const fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Runs the REPL as the direct child, so a timed-out probe kills the
    /// REPL itself rather than a wrapper.
    fn probe(&self) -> bool {
        let spawned = Command::new(self.repl_path.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(error) => {
                debug!(target: REPL_TARGET, %error, "failed to spawn REPL probe");
                return false;
            }
        };
        if let Some(mut stdin) = child.stdin.take()
            && let Err(error) = stdin.write_all(PROBE_INPUT)
        {
            debug!(target: REPL_TARGET, %error, "failed to send REPL probe input");
        }
        wait_for_success(&mut child, self.probe_timeout)
    }
}

impl ReadinessSignal for ReplProbeSignal {
    fn name(&self) -> &'static str {
        "repl_probe"
    }

    fn check_ready(&self, _cursor: &Cursor) -> bool {
        self.probe()
    }
}

pub(super) fn wait_for_success(child: &mut Child, timeout: Duration) -> bool {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) if start.elapsed() >= timeout => {
                debug!(target: REPL_TARGET, ?timeout, "REPL probe timed out; killing");
                drop(child.kill());
                drop(child.wait());
                return false;
            }
            Ok(None) => thread::sleep(WAIT_INTERVAL),
            Err(error) => {
                debug!(target: REPL_TARGET, %error, "failed to wait for REPL probe");
                return false;
            }
        }
    }
}
