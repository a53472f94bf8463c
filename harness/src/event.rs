//! Structured lifecycle events consumed by reporting sinks.

use serde::{Deserialize, Serialize};

use crate::core::status::TestStatus;

/// One structured fact about suite progress.
///
/// Events are emitted synchronously and in the exact order the lifecycle
/// operations were called. The engine only ships facts (names, statuses,
/// counts, durations); presentation is entirely the sink's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A group was opened, or recorded as skipped without opening.
    GroupOpened {
        qualified_name: String,
        skipped: bool,
    },
    /// A non-skipped test began executing.
    TestStarted { qualified_name: String },
    /// A test reached a terminal status. Skipped tests appear here with
    /// status `skip` and a zero duration, without a preceding
    /// `TestStarted`.
    TestFinished {
        name: String,
        status: TestStatus,
        duration_ms: u64,
    },
    /// A group closed and folded its totals into its parent (or into the
    /// process totals when `is_root` is set).
    GroupClosed {
        name: String,
        pass: u32,
        fail: u32,
        skip: u32,
        duration_ms: u64,
        is_root: bool,
    },
    /// The whole run concluded with these process-wide totals.
    Concluded {
        pass: u32,
        fail: u32,
        skip: u32,
        duration_ms: u64,
    },
}

/// Receives lifecycle events; the engine never formats output itself.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}
