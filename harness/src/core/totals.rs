//! Pass/fail/skip counters with accumulated duration.

use std::time::Duration;

use crate::core::status::TestStatus;

/// Counter block owned by one group while it is open, and by the process
/// as a whole once the root group folds in.
///
/// A closed group's totals are folded into its parent exactly once and
/// never read again afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub pass: u32,
    pub fail: u32,
    pub skip: u32,
    pub duration: Duration,
}

impl Totals {
    /// Fold `other` into `self` by strict addition.
    pub fn absorb(&mut self, other: Totals) {
        self.pass += other.pass;
        self.fail += other.fail;
        self.skip += other.skip;
        self.duration += other.duration;
    }

    /// Count one finished (or skipped) test.
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.pass += 1,
            TestStatus::Fail => self.fail += 1,
            TestStatus::Skip => self.skip += 1,
        }
    }
}
