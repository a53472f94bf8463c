//! Stable exit codes for suite-driving binaries.

/// Every test passed (or was skipped).
pub const OK: i32 = 0;
/// At least one test failed.
pub const FAILED: i32 = 1;
/// A lifecycle operation was called out of contract.
pub const USAGE: i32 = 2;
