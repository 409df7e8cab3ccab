//! The single "poll until predicate or deadline" primitive.
//!
//! The exit wait, the readiness wait and the speech confirmation wait all use
//! [`poll_until`]. Each call measures its deadline from its own start.

use std::thread;
use std::time::{Duration, Instant};

/// Result of a bounded poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The predicate returned `true` after the given elapsed time.
    Satisfied(Duration),
    /// The deadline passed; the payload is the total time spent polling.
    TimedOut(Duration),
}

impl PollOutcome {
    /// Time spent polling, whichever way the poll ended.
    #[must_use]
    pub const fn elapsed(self) -> Duration {
        match self {
            Self::Satisfied(elapsed) | Self::TimedOut(elapsed) => elapsed,
        }
    }

    /// Whether the predicate was satisfied before the deadline.
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        matches!(self, Self::Satisfied(_))
    }

    /// Elapsed time in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn elapsed_ms(self) -> u64 {
        duration_ms(self.elapsed())
    }
}

/// Evaluates `predicate` every `interval` until it holds or `timeout` passes.
///
/// The predicate is always evaluated at least once, even with a zero timeout.
/// The final sleep is clamped so the loop never overshoots the deadline by
/// more than one predicate evaluation.
pub fn poll_until<F>(interval: Duration, timeout: Duration, mut predicate: F) -> PollOutcome
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    let deadline = start + timeout;
    loop {
        if predicate() {
            return PollOutcome::Satisfied(start.elapsed());
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return PollOutcome::TimedOut(start.elapsed());
        }
        thread::sleep(interval.min(remaining));
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
