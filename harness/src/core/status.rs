//! Terminal status of a single test case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final status of a test case.
///
/// `Skip` is only ever produced by the skip short-circuit: a skipped test
/// never runs, so a test that is actually executing is always `Pass` or
/// `Fail`. "No test open" is not a status; it is the `None` arm of
/// [`Group::test`](crate::core::stack::Group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl TestStatus {
    pub fn passed(self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Skip => "SKIP",
        };
        f.write_str(label)
    }
}
