use crate::readiness::ReadinessSignal;
use crate::tail::{Cursor, LogTailer};

/// Ready once a line containing the marker is appended after the cursor.
#[derive(Debug, Clone)]
pub struct LogMarkerSignal {
    log: LogTailer,
    marker: String,
}

impl LogMarkerSignal {
    /// Watches `log` for `marker`.
    #[must_use]
    pub fn new(log: LogTailer, marker: impl Into<String>) -> Self {
        Self {
            log,
            marker: marker.into(),
        }
    }
}

impl ReadinessSignal for LogMarkerSignal {
    fn name(&self) -> &'static str {
        "log_marker"
    }

    fn check_ready(&self, cursor: &Cursor) -> bool {
        self.log
            .read_from(cursor.offset)
            .lines()
            .any(|line| line.contains(self.marker.as_str()))
    }
}
