//! Reads the portion of a log file appended after a byte offset.
//!
//! Every function here is infallible. A missing file, an offset past the end
//! or a file truncated below the offset all read as "no new content", so the
//! polling loops built on top can retry unconditionally.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

const TAIL_TARGET: &str = "talon_restart::tail";

/// Position in the log captured once before a restart begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset of the log's end at capture time.
    pub offset: u64,
    /// Readiness signal observation taken at capture time, if the signal
    /// needs one to detect change.
    pub baseline: Option<String>,
}

impl Cursor {
    /// Builds a cursor at `offset` with no baseline.
    #[must_use]
    pub const fn at(offset: u64) -> Self {
        Self {
            offset,
            baseline: None,
        }
    }
}

/// Size of the file at `path` in bytes, or `0` when it cannot be read.
#[must_use]
pub fn size_of(path: &Utf8Path) -> u64 {
    fs::metadata(path).map_or(0, |metadata| metadata.len())
}

/// Reads everything appended to `path` after `offset`.
///
/// Returns an empty string when the file is unreadable, when `offset` is at or
/// beyond the end, or when the file has been truncated below `offset`. Invalid
/// UTF-8 is replaced rather than rejected.
#[must_use]
pub fn read_from(path: &Utf8Path, offset: u64) -> String {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            debug!(target: TAIL_TARGET, path = %path, %error, "log unreadable");
            return String::new();
        }
    };

    let len = file.metadata().map_or(0, |metadata| metadata.len());
    if offset >= len {
        return String::new();
    }

    let mut bytes = Vec::new();
    let read = file
        .seek(SeekFrom::Start(offset))
        .and_then(|_| file.read_to_end(&mut bytes));
    if let Err(error) = read {
        debug!(target: TAIL_TARGET, path = %path, offset, %error, "log read failed");
        return String::new();
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Tails one fixed log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTailer {
    path: Utf8PathBuf,
}

impl LogTailer {
    /// Builds a tailer for `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the tailed log.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Current size of the log in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        size_of(&self.path)
    }

    /// Content appended after `offset`.
    #[must_use]
    pub fn read_from(&self, offset: u64) -> String {
        read_from(&self.path, offset)
    }
}
