/// Wall clock in milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Whole seconds between two timestamps, zero if `to` is earlier
pub fn seconds_between(from_ms: i64, to_ms: i64) -> u64 {
    if to_ms <= from_ms {
        0
    } else {
        ((to_ms - from_ms) / 1000) as u64
    }
}

/// Manually advanced clock for simulated time
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::cell::Cell<i64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: std::cell::Cell::new(start_ms),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + secs * 1000);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
