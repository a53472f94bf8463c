//! Cleanup hooks and their resolution order.

use std::fmt;

use crate::core::stack::Group;
use crate::core::test::TestSnapshot;

/// Observer invoked after each non-skipped test completes.
///
/// Hooks receive a read-only snapshot of the finished test and cannot
/// alter its recorded status.
pub type CleanupFn = Box<dyn FnMut(&TestSnapshot)>;

/// Whether a group's hook also fires for tests in nested descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupScope {
    /// Fires for tests in this group and in any group nested inside it.
    Inherited,
    /// Fires only for tests run directly in this group.
    ThisGroupOnly,
}

/// A cleanup hook registered on one group.
pub struct CleanupHook {
    pub hook: CleanupFn,
    pub scope: CleanupScope,
}

impl fmt::Debug for CleanupHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupHook")
            .field("hook", &"..")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Run the cleanup chain for a finished test.
///
/// Walks the open groups from the innermost outward; a hook registered
/// with [`CleanupScope::ThisGroupOnly`] fires only when its group is the
/// innermost one (the group the test ran in). The process-wide root hook,
/// if any, runs last. Groups without a hook are skipped silently.
pub fn run_chain<'a, I>(frames_innermost_first: I, root: Option<&mut CleanupFn>, snapshot: &TestSnapshot)
where
    I: Iterator<Item = &'a mut Group>,
{
    for (position, group) in frames_innermost_first.enumerate() {
        let Some(cleanup) = group.cleanup.as_mut() else {
            continue;
        };
        let innermost = position == 0;
        if !innermost && cleanup.scope == CleanupScope::ThisGroupOnly {
            continue;
        }
        (cleanup.hook)(snapshot);
    }

    if let Some(root_hook) = root {
        root_hook(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stack::GroupStack;
    use crate::core::status::TestStatus;
    use crate::test_support::{hook_log, labeled_hook};
    use std::time::Duration;

    fn snapshot() -> TestSnapshot {
        TestSnapshot {
            name: "t".to_string(),
            status: TestStatus::Pass,
            expect_failure: false,
            duration: Duration::ZERO,
        }
    }

    fn stack_with(names: &[&str]) -> GroupStack {
        let mut stack = GroupStack::new();
        for name in names {
            stack.push(name).expect("push");
        }
        stack
    }

    /// Hooks run innermost to outermost, then the root hook.
    #[test]
    fn chain_runs_innermost_outward_then_root() {
        let log = hook_log();
        let mut stack = stack_with(&["outer", "inner"]);
        for group in stack.frames_innermost_first() {
            let name = group.name.clone();
            group.cleanup = Some(CleanupHook {
                hook: Box::new(labeled_hook(&name, &log)),
                scope: CleanupScope::Inherited,
            });
        }
        let mut root: CleanupFn = Box::new(labeled_hook("root", &log));

        run_chain(stack.frames_innermost_first(), Some(&mut root), &snapshot());
        assert_eq!(*log.borrow(), vec!["inner", "outer", "root"]);
    }

    /// A `ThisGroupOnly` hook is skipped for tests in nested descendants
    /// but fires when its own group is the innermost.
    #[test]
    fn this_group_only_skipped_for_descendants() {
        let log = hook_log();
        let mut stack = stack_with(&["outer", "inner"]);
        // Outer hook is restricted; the test belongs to `inner`.
        if let Some(outer) = stack.frames_innermost_first().nth(1) {
            outer.cleanup = Some(CleanupHook {
                hook: Box::new(labeled_hook("outer", &log)),
                scope: CleanupScope::ThisGroupOnly,
            });
        }

        run_chain(stack.frames_innermost_first(), None, &snapshot());
        assert!(log.borrow().is_empty());

        let mut single = stack_with(&["outer"]);
        if let Some(outer) = single.top_mut() {
            outer.cleanup = Some(CleanupHook {
                hook: Box::new(labeled_hook("outer", &log)),
                scope: CleanupScope::ThisGroupOnly,
            });
        }
        run_chain(single.frames_innermost_first(), None, &snapshot());
        assert_eq!(*log.borrow(), vec!["outer"]);
    }

    /// No hooks registered anywhere is a silent no-op.
    #[test]
    fn absent_hooks_are_a_noop() {
        let mut stack = stack_with(&["outer", "inner"]);
        run_chain(stack.frames_innermost_first(), None, &snapshot());
    }
}
