//! Minimal hierarchical test-execution engine.
//!
//! Tracks nested groups of test cases, runs each case exactly once,
//! aggregates pass/fail/skip counts up the group tree, and fires
//! per-group cleanup hooks after every case. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic lifecycle logic (stack bounds,
//!   assertion reduction, counter folding). No I/O, fully testable in
//!   isolation.
//! - **[`event`] / [`report`]**: Structured facts about suite progress
//!   and the sinks that present them. The engine never formats output
//!   itself.
//!
//! [`Runner`] is the caller-facing facade orchestrating
//! open-group → open-test → check* → close-test → close-group →
//! conclude, and the only component callers drive directly.

pub mod cleanup;
pub mod clock;
pub mod core;
pub mod error;
pub mod event;
pub mod exit_codes;
pub mod logging;
pub mod report;
mod runner;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use runner::{Conclusion, Runner, TestHandle};
