//! Default values used when a configuration layer leaves a field unset.

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default process name of the host application.
pub const DEFAULT_APP_NAME: &str = "Talon";

/// Default launch target of the host application.
pub const DEFAULT_APP_PATH: &str = "/Applications/Talon.app";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line written by the user startup script once loading completes.
pub const DEFAULT_READY_MARKER: &str = "[+] startup complete";

/// Log line written when the speech system recognises a phrase.
pub const DEFAULT_SPEECH_MARKER: &str = "[~] speech detected";

pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const SETTLE_DELAY: Duration = Duration::from_millis(500);
pub(crate) const EXIT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const READY_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const SPEECH_TIMEOUT: Duration = Duration::from_secs(15);

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Computes the default Talon home directory, `~/.talon`.
///
/// Falls back to the temporary directory when no home directory can be
/// resolved so that path derivation never fails.
#[must_use]
pub fn default_talon_home() -> Utf8PathBuf {
    let base = dirs::home_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .unwrap_or_else(fallback_base_directory);
    base.join(".talon")
}

fn fallback_base_directory() -> Utf8PathBuf {
    let candidate = env::temp_dir();
    Utf8PathBuf::from_path_buf(candidate).unwrap_or_else(|_| Utf8PathBuf::from("/tmp"))
}
