use std::time::{Duration, Instant};

/// Timeout applied when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Wall-clock budget of one solve call.
///
/// Expiry is cooperative: searches poll [`Deadline::expired`] once per node,
/// iteration or table cell, set their timed-out flag and unwind. There is no
/// preemption, so a check is only observed at those defined points.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.start.elapsed())
    }
}
