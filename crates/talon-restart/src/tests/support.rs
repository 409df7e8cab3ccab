//! Deterministic stand-ins for the process table and readiness signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::probe::ProcessProbe;
use crate::readiness::ReadinessSignal;
use crate::tail::Cursor;

/// Reports the host as running for a fixed number of polls.
pub(crate) struct CountdownProbe {
    remaining: AtomicUsize,
}

impl CountdownProbe {
    pub(crate) fn running_for(polls: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(polls),
        }
    }
}

impl ProcessProbe for CountdownProbe {
    fn is_running(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

/// Becomes ready after a fixed number of failed checks, or never.
pub(crate) struct ScriptedReadiness {
    ready_after: Option<usize>,
    checks: Arc<AtomicUsize>,
}

impl ScriptedReadiness {
    pub(crate) fn ready_after(failed_checks: usize) -> Self {
        Self {
            ready_after: Some(failed_checks),
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn never() -> Self {
        Self {
            ready_after: None,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn checks(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.checks)
    }
}

impl ReadinessSignal for ScriptedReadiness {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn check_ready(&self, _cursor: &Cursor) -> bool {
        let previous = self.checks.fetch_add(1, Ordering::SeqCst);
        self.ready_after
            .is_some_and(|failed_checks| previous >= failed_checks)
    }
}
