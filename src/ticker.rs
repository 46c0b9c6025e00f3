use std::time::Duration;

/// Default event poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Period of a task timer tick in milliseconds
pub const TICK_PERIOD_MS: i64 = 1000;

/// Get event poll duration
pub fn poll_duration(poll_ms: u64) -> Duration {
    Duration::from_millis(poll_ms)
}

/// Recurring 1 Hz tick schedule owned by a single timer
///
/// Ticks are counted against the wall clock rather than event loop wakeups,
/// so a slow frame yields several due ticks on the next poll instead of
/// losing time. Dropping the handle cancels it.
#[derive(Debug)]
pub struct Interval {
    period_ms: i64,
    next_due_ms: i64,
}

impl Interval {
    /// Start a schedule whose first tick is one period after `now_ms`
    pub fn start(now_ms: i64) -> Self {
        Self {
            period_ms: TICK_PERIOD_MS,
            next_due_ms: now_ms + TICK_PERIOD_MS,
        }
    }

    /// Number of ticks that fell due up to `now_ms`, consuming them
    pub fn poll(&mut self, now_ms: i64) -> u64 {
        if now_ms < self.next_due_ms {
            return 0;
        }
        let due = (now_ms - self.next_due_ms) / self.period_ms + 1;
        self.next_due_ms += due * self.period_ms;
        due as u64
    }

    /// Instant of the most recent tick (or of the start when none fired)
    pub fn last_boundary_ms(&self) -> i64 {
        self.next_due_ms - self.period_ms
    }
}
