use std::fs;

use camino::Utf8PathBuf;

use crate::readiness::ReadinessSignal;
use crate::tail::Cursor;

/// Ready once the marker file holds a timestamp different from the baseline.
///
/// The host's user startup script rewrites the file as its last action, so a
/// changed, non-empty value means this launch finished loading.
#[derive(Debug, Clone)]
pub struct TimestampFileSignal {
    path: Utf8PathBuf,
}

impl TimestampFileSignal {
    /// Watches the marker file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn current(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

impl ReadinessSignal for TimestampFileSignal {
    fn name(&self) -> &'static str {
        "timestamp_file"
    }

    fn baseline(&self) -> Option<String> {
        self.current()
    }

    fn check_ready(&self, cursor: &Cursor) -> bool {
        match self.current() {
            Some(current) => cursor.baseline.as_deref() != Some(current.as_str()),
            None => false,
        }
    }
}
