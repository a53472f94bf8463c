//! Test-only sinks, clocks, and hook recorders.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Clock;
use crate::core::test::TestSnapshot;
use crate::event::{Event, EventSink};

/// Sink that records every event for later inspection.
///
/// Clones share the same buffer: keep a clone outside the runner to read
/// events back while the runner owns the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Manually advanced clock for deterministic durations.
///
/// Clones share the same instant, so a clone kept outside the runner can
/// advance time between lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

/// Shared label log for asserting cleanup-hook invocation order.
pub type HookLog = Rc<RefCell<Vec<String>>>;

pub fn hook_log() -> HookLog {
    Rc::default()
}

/// Hook that appends `label` to `log` each time it fires.
pub fn labeled_hook(label: &str, log: &HookLog) -> impl FnMut(&TestSnapshot) + 'static {
    let label = label.to_string();
    let log = Rc::clone(log);
    move |_snapshot| log.borrow_mut().push(label.clone())
}
