//! The runner facade: the only component callers drive directly.

use std::time::Duration;

use tracing::debug;

use crate::cleanup::{self, CleanupFn, CleanupHook, CleanupScope};
use crate::clock::{Clock, MonotonicClock};
use crate::core::stack::GroupStack;
use crate::core::status::TestStatus;
use crate::core::test::{ActiveTest, TestSnapshot};
use crate::core::totals::Totals;
use crate::error::UsageError;
use crate::event::{Event, EventSink};
use crate::exit_codes;

/// Final process-wide tally returned by [`Runner::conclude`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conclusion {
    pub pass: u32,
    pub fail: u32,
    pub skip: u32,
    pub duration: Duration,
}

impl Conclusion {
    /// True if any test failed.
    pub fn failed(&self) -> bool {
        self.fail > 0
    }

    /// Exit-status mapping for suite-driving binaries.
    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            exit_codes::FAILED
        } else {
            exit_codes::OK
        }
    }
}

/// Hierarchical test-execution engine.
///
/// Owns the bounded group stack and the process-wide totals; every
/// lifecycle operation advances the state machine synchronously and emits
/// structured events to the sink. Construction replaces the classic
/// `init` call, so a double init is unrepresentable;
/// [`conclude`](Self::conclude) ends the lifecycle and every later
/// operation fails with [`UsageError::AlreadyConcluded`].
///
/// The runner is single-threaded and non-reentrant: callers advance the
/// state machine one operation at a time, and a test that is never closed
/// leaves the runner in the "test open" state for good.
pub struct Runner<S, C = MonotonicClock> {
    stack: GroupStack,
    totals: Totals,
    root_cleanup: Option<CleanupFn>,
    concluded: bool,
    sink: S,
    clock: C,
}

/// Scoped handle passed to [`Runner::run_test`] bodies.
///
/// Lets the body record assertions against the open test without being
/// able to touch the rest of the lifecycle.
pub struct TestHandle<'a> {
    test: &'a mut ActiveTest,
}

impl TestHandle<'_> {
    /// Record one assertion; see [`Runner::check`].
    pub fn check(&mut self, expr: bool) -> bool {
        self.test.record_check(expr)
    }
}

impl<S: EventSink> Runner<S, MonotonicClock> {
    pub fn new(sink: S) -> Self {
        Self::with_clock(sink, MonotonicClock::new())
    }
}

impl<S: EventSink, C: Clock> Runner<S, C> {
    pub fn with_clock(sink: S, clock: C) -> Self {
        Self {
            stack: GroupStack::new(),
            totals: Totals::default(),
            root_cleanup: None,
            concluded: false,
            sink,
            clock,
        }
    }

    fn ensure_live(&self) -> Result<(), UsageError> {
        if self.concluded {
            return Err(UsageError::AlreadyConcluded);
        }
        Ok(())
    }

    /// Open a new group nested under the current one.
    ///
    /// The stack must be below its depth limit and the enclosing group,
    /// if any, must have no open test.
    pub fn open_group(&mut self, name: &str) -> Result<(), UsageError> {
        self.ensure_live()?;
        self.stack.ensure_can_open()?;
        let qualified_name = self.stack.qualified(name);
        debug!(group = %qualified_name, depth = self.stack.depth() + 1, "group opened");
        self.stack.push(name)?;
        self.sink.emit(&Event::GroupOpened {
            qualified_name,
            skipped: false,
        });
        Ok(())
    }

    /// Record a group as skipped without opening it.
    ///
    /// The same preconditions as [`open_group`](Self::open_group) apply.
    /// A skipped group is never pushed: it contributes nothing to any
    /// counter and its contents are simply not run.
    pub fn skip_group(&mut self, name: &str) -> Result<(), UsageError> {
        self.ensure_live()?;
        self.stack.ensure_can_open()?;
        let qualified_name = self.stack.qualified(name);
        debug!(group = %qualified_name, "group skipped");
        self.sink.emit(&Event::GroupOpened {
            qualified_name,
            skipped: true,
        });
        Ok(())
    }

    /// Close the top group, folding its totals into the parent group or,
    /// for the root group, into the process-wide totals.
    pub fn close_group(&mut self) -> Result<(), UsageError> {
        self.ensure_live()?;
        let group = self.stack.pop()?;
        let is_root = self.stack.is_empty();
        let totals = group.totals;
        debug!(group = %group.name, is_root, pass = totals.pass, fail = totals.fail, "group closed");
        match self.stack.top_mut() {
            Some(parent) => parent.totals.absorb(totals),
            None => self.totals.absorb(totals),
        }
        self.sink.emit(&Event::GroupClosed {
            name: group.name,
            pass: totals.pass,
            fail: totals.fail,
            skip: totals.skip,
            duration_ms: as_millis(totals.duration),
            is_root,
        });
        Ok(())
    }

    /// Open a test in the top group with the optimistic `Pass` status.
    ///
    /// With `expect_failure` set, assertion polarity is flipped for the
    /// whole test ("this is expected to fail").
    pub fn open_test(&mut self, name: &str, expect_failure: bool) -> Result<(), UsageError> {
        self.ensure_live()?;
        let qualified_name = self.stack.qualified(name);
        let started = self.clock.elapsed();
        let top = self.stack.top_mut().ok_or(UsageError::NoOpenGroup)?;
        if top.test.is_some() {
            return Err(UsageError::TestAlreadyOpen);
        }
        top.test = Some(ActiveTest::open(name, expect_failure, started));
        debug!(test = %qualified_name, expect_failure, "test started");
        self.sink.emit(&Event::TestStarted { qualified_name });
        Ok(())
    }

    /// Record a test as skipped: bumps the top group's skip counter and
    /// emits a finished event with a zero duration. No test record is
    /// created and no cleanup hook fires.
    pub fn skip_test(&mut self, name: &str) -> Result<(), UsageError> {
        self.ensure_live()?;
        let top = self.stack.top_mut().ok_or(UsageError::NoOpenGroup)?;
        if top.test.is_some() {
            return Err(UsageError::TestAlreadyOpen);
        }
        top.totals.record(TestStatus::Skip);
        debug!(test = name, "test skipped");
        self.sink.emit(&Event::TestFinished {
            name: name.to_string(),
            status: TestStatus::Skip,
            duration_ms: 0,
        });
        Ok(())
    }

    /// Record one assertion against the open test.
    ///
    /// Reduction is monotonic downward: once any assertion nets a failure
    /// (`expr ^ expect_failure` false), the test stays failed. Returns the
    /// raw `expr` so callers may branch on it; nothing beyond the open
    /// test's status is touched.
    pub fn check(&mut self, expr: bool) -> Result<bool, UsageError> {
        self.ensure_live()?;
        let top = self.stack.top_mut().ok_or(UsageError::NoOpenGroup)?;
        let test = top.test.as_mut().ok_or(UsageError::NoOpenTest)?;
        Ok(test.record_check(expr))
    }

    /// Close the open test: run the cleanup chain, fold the duration and
    /// final status into the top group, and emit the finished event.
    pub fn close_test(&mut self) -> Result<TestStatus, UsageError> {
        self.ensure_live()?;
        let now = self.clock.elapsed();
        let snapshot = {
            let top = self.stack.top().ok_or(UsageError::NoOpenGroup)?;
            let test = top.test.as_ref().ok_or(UsageError::NoOpenTest)?;
            test.snapshot(now.saturating_sub(test.started))
        };

        cleanup::run_chain(
            self.stack.frames_innermost_first(),
            self.root_cleanup.as_mut(),
            &snapshot,
        );

        let top = self.stack.top_mut().ok_or(UsageError::NoOpenGroup)?;
        top.test = None;
        top.totals.duration += snapshot.duration;
        top.totals.record(snapshot.status);
        debug!(
            test = %snapshot.name,
            status = %snapshot.status,
            duration_ms = as_millis(snapshot.duration),
            "test finished"
        );
        self.sink.emit(&Event::TestFinished {
            name: snapshot.name.clone(),
            status: snapshot.status,
            duration_ms: as_millis(snapshot.duration),
        });
        Ok(snapshot.status)
    }

    /// Register a cleanup hook at the current nesting level.
    ///
    /// Inside a group the hook attaches to that group and fires per
    /// `scope`; at the top level it becomes the process-wide root hook,
    /// which always runs last for every finished test (`scope` is
    /// meaningless there and ignored).
    pub fn on_cleanup<F>(&mut self, hook: F, scope: CleanupScope) -> Result<(), UsageError>
    where
        F: FnMut(&TestSnapshot) + 'static,
    {
        self.ensure_live()?;
        match self.stack.top_mut() {
            None => self.root_cleanup = Some(Box::new(hook)),
            Some(group) => {
                if group.test.is_some() {
                    return Err(UsageError::CleanupDuringTest);
                }
                group.cleanup = Some(CleanupHook {
                    hook: Box::new(hook),
                    scope,
                });
            }
        }
        Ok(())
    }

    /// Open a test, run `body`, fold its boolean return into the status,
    /// and close the test.
    ///
    /// The return value acts as an implicit final assertion: a `false`
    /// return fails the test like any failed check. For an
    /// expected-failure test the implicit assertion is not applied — the
    /// status comes solely from the body's explicit checks, so a
    /// conventional `false` return cannot drag an inverted result down.
    pub fn run_test<F>(
        &mut self,
        name: &str,
        expect_failure: bool,
        body: F,
    ) -> Result<TestStatus, UsageError>
    where
        F: FnOnce(&mut TestHandle<'_>) -> bool,
    {
        self.open_test(name, expect_failure)?;
        let outcome = {
            let top = self.stack.top_mut().ok_or(UsageError::NoOpenGroup)?;
            let test = top.test.as_mut().ok_or(UsageError::NoOpenTest)?;
            let mut handle = TestHandle { test };
            body(&mut handle)
        };
        if !expect_failure {
            self.check(outcome)?;
        }
        self.close_test()
    }

    /// End the lifecycle: all groups must be closed. Emits the final
    /// process-wide summary, marks the runner concluded, and releases the
    /// stack's reserved storage.
    pub fn conclude(&mut self) -> Result<Conclusion, UsageError> {
        self.ensure_live()?;
        if !self.stack.is_empty() {
            return Err(UsageError::GroupsStillOpen {
                open: self.stack.depth(),
            });
        }
        self.concluded = true;
        self.stack.release();
        let totals = self.totals;
        debug!(
            pass = totals.pass,
            fail = totals.fail,
            skip = totals.skip,
            duration_ms = as_millis(totals.duration),
            "suite concluded"
        );
        self.sink.emit(&Event::Concluded {
            pass: totals.pass,
            fail: totals.fail,
            skip: totals.skip,
            duration_ms: as_millis(totals.duration),
        });
        Ok(Conclusion {
            pass: totals.pass,
            fail: totals.fail,
            skip: totals.skip,
            duration: totals.duration,
        })
    }

    /// Borrow the sink, e.g. to inspect a recording sink mid-run.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
