//! The single in-flight test case and its assertion reduction.

use std::time::Duration;

use crate::core::status::TestStatus;

/// The currently open test inside a group.
///
/// Exactly one test may be open at a time, and only in the top-of-stack
/// group. The status starts at the optimistic `Pass` default and can only
/// move downward from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTest {
    pub name: String,
    pub status: TestStatus,
    pub expect_failure: bool,
    /// Clock offset at which the test started.
    pub started: Duration,
}

impl ActiveTest {
    pub fn open(name: &str, expect_failure: bool, started: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: TestStatus::Pass,
            expect_failure,
            started,
        }
    }

    /// Reduce one assertion result into the running status.
    ///
    /// The net result of an assertion is `expr ^ expect_failure`: with
    /// `expect_failure` set, a literal-false condition counts as a pass.
    /// The status stays `Pass` only if the net result passes *and* the
    /// status was already `Pass`; once any assertion nets a failure the
    /// test is failed for good, no matter what later assertions do.
    ///
    /// Returns the raw `expr` so callers can branch on it.
    pub fn record_check(&mut self, expr: bool) -> bool {
        let is_pass = expr ^ self.expect_failure;
        self.status = if is_pass && self.status == TestStatus::Pass {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        };
        expr
    }

    /// Read-only view handed to cleanup hooks.
    pub fn snapshot(&self, duration: Duration) -> TestSnapshot {
        TestSnapshot {
            name: self.name.clone(),
            status: self.status,
            expect_failure: self.expect_failure,
            duration,
        }
    }
}

/// What cleanup hooks get to see about the test that just finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSnapshot {
    pub name: String,
    pub status: TestStatus,
    pub expect_failure: bool,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(expect_failure: bool) -> ActiveTest {
        ActiveTest::open("t", expect_failure, Duration::ZERO)
    }

    /// A test with zero assertions keeps the optimistic `Pass` default.
    #[test]
    fn zero_assertions_pass() {
        assert_eq!(test(false).status, TestStatus::Pass);
    }

    /// Once any assertion fails, later passing assertions cannot recover.
    #[test]
    fn status_is_monotonic_downward() {
        let mut t = test(false);
        t.record_check(true);
        t.record_check(false);
        t.record_check(true);
        t.record_check(true);
        assert_eq!(t.status, TestStatus::Fail);
    }

    /// With `expect_failure`, a false condition passes and a true one fails.
    #[test]
    fn expect_failure_inverts_polarity() {
        let mut t = test(true);
        t.record_check(false);
        assert_eq!(t.status, TestStatus::Pass);

        let mut t = test(true);
        t.record_check(true);
        assert_eq!(t.status, TestStatus::Fail);
    }

    /// For an inverted test the first assertion's outcome can lock in
    /// `Fail` even if a later assertion is the "real" inverted check.
    /// This exact reduction is load-bearing for suites built on it.
    #[test]
    fn inverted_first_assertion_locks_in_fail() {
        let mut t = test(true);
        t.record_check(true);
        t.record_check(false);
        assert_eq!(t.status, TestStatus::Fail);
    }

    /// `record_check` returns the raw expression, not the net result.
    #[test]
    fn returns_raw_expression() {
        let mut t = test(true);
        assert!(!t.record_check(false));
        assert!(t.record_check(true));
    }

    /// Snapshot captures name, status, polarity, and the given duration.
    #[test]
    fn snapshot_reflects_final_state() {
        let mut t = test(false);
        t.record_check(false);
        let snap = t.snapshot(Duration::from_millis(7));
        assert_eq!(snap.name, "t");
        assert_eq!(snap.status, TestStatus::Fail);
        assert!(!snap.expect_failure);
        assert_eq!(snap.duration, Duration::from_millis(7));
    }
}
