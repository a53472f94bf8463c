//! Fatal usage errors for lifecycle-contract violations.

use thiserror::Error;

/// A lifecycle operation was called out of contract.
///
/// Every variant indicates a defect in the *calling* code, never in the
/// tests under execution: a failing assertion is an ordinary outcome and
/// a skip is an ordinary non-outcome, but a mis-sequenced lifecycle call
/// is unrecoverable. The contract is fail-fast: a caller receiving any
/// `UsageError` must abort the run. The failing operation returns before
/// mutating any state, so already-tracked counters stay intact, but
/// continuing after a usage error is unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("harness already concluded; build a new runner to execute more suites")]
    AlreadyConcluded,
    #[error("group depth limit of {max} exceeded")]
    DepthExceeded { max: usize },
    #[error("a test is still open; close it before opening or closing a group")]
    TestStillOpen,
    #[error("a test is already open; only one test may run at a time")]
    TestAlreadyOpen,
    #[error("no group is open")]
    NoOpenGroup,
    #[error("no test is open")]
    NoOpenTest,
    #[error("{open} group(s) still open; close every group before concluding")]
    GroupsStillOpen { open: usize },
    #[error("cannot register a cleanup hook while a test is open")]
    CleanupDuringTest,
}
