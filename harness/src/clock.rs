//! Monotonic elapsed-time source.

use std::time::{Duration, Instant};

/// Supplies monotonic elapsed time; consumed, never interpreted, by the
/// engine.
pub trait Clock {
    /// Offset from the clock's origin. Must be monotonically
    /// non-decreasing.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}
