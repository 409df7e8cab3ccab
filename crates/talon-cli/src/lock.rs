//! Exclusive lock serialising concurrent `talonctl restart` invocations.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::process;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const LOCK_TARGET: &str = "talon_cli::lock";
const LOCK_FILE: &str = ".talonctl-restart.lock";

/// Errors raised while acquiring the restart lock.
#[derive(Debug, Error)]
pub(crate) enum RestartLockError {
    #[error("another restart is already in progress (lock file {path})")]
    Held { path: Utf8PathBuf },
    #[error("failed to create lock file {path}: {source}")]
    Create {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove stale lock file {path}: {source}")]
    Cleanup {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Lock file held for the duration of one restart; removed on drop.
#[derive(Debug)]
pub(crate) struct RestartLock {
    path: Utf8PathBuf,
}

impl RestartLock {
    /// Creates the lock file in `directory`, replacing one left behind by a
    /// process that no longer exists.
    pub(crate) fn acquire(directory: &Utf8Path) -> Result<Self, RestartLockError> {
        let path = directory.join(LOCK_FILE);
        if let Err(source) = fs::create_dir_all(directory) {
            return Err(RestartLockError::Create { path, source });
        }
        match create_lock_file(&path) {
            Err(RestartLockError::Held { .. }) if !owner_alive(&path) => {
                remove_stale_lock(&path)?;
                create_lock_file(&path)
            }
            other => other,
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Drop for RestartLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => {
                warn!(
                    target: LOCK_TARGET,
                    file = %self.path,
                    error = %error,
                    "failed to remove restart lock"
                );
            }
            _ => {}
        }
    }
}

fn create_lock_file(path: &Utf8Path) -> Result<RestartLock, RestartLockError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            return Err(RestartLockError::Held {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RestartLockError::Create {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let lock = RestartLock {
        path: path.to_path_buf(),
    };
    if let Err(source) = writeln!(file, "{}", process::id()) {
        return Err(RestartLockError::Create {
            path: lock.path.clone(),
            source,
        });
    }
    debug!(target: LOCK_TARGET, file = %lock.path, "restart lock acquired");
    Ok(lock)
}

/// An unreadable owner counts as alive: the file may belong to a run that
/// has not written its PID yet.
fn owner_alive(path: &Utf8Path) -> bool {
    let Some(pid) = fs::read_to_string(path)
        .ok()
        .and_then(|content| content.trim().parse::<u32>().ok())
    else {
        return true;
    };
    let alive = process_alive(pid);
    if !alive {
        warn!(
            target: LOCK_TARGET,
            pid,
            file = %path,
            "restart lock owner not detected; removing stale lock"
        );
    }
    alive
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    if raw == 0 {
        return false;
    }
    !matches!(kill(Pid::from_raw(raw), None), Err(Errno::ESRCH))
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn remove_stale_lock(path: &Utf8Path) -> Result<(), RestartLockError> {
    match fs::remove_file(path) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => Err(RestartLockError::Cleanup {
            path: path.to_path_buf(),
            source: error,
        }),
        _ => Ok(()),
    }
}
