//! Bounded stack of open group frames.

use std::fmt;

use crate::cleanup::CleanupHook;
use crate::core::test::ActiveTest;
use crate::core::totals::Totals;
use crate::error::UsageError;

/// Maximum group nesting depth.
pub const MAX_GROUP_DEPTH: usize = 4;

/// One open nesting level of a suite.
///
/// A group's counters reflect only tests run directly inside it until it
/// closes; at that point they are folded into the parent and never
/// touched again.
pub struct Group {
    pub name: String,
    /// The in-flight test, if one is open in this group.
    pub test: Option<ActiveTest>,
    pub totals: Totals,
    pub cleanup: Option<CleanupHook>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            test: None,
            totals: Totals::default(),
            cleanup: None,
        }
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("test", &self.test)
            .field("totals", &self.totals)
            .field("cleanup", &self.cleanup)
            .finish()
    }
}

/// Bounded-depth stack of open groups.
///
/// Frame storage is reserved up front for [`MAX_GROUP_DEPTH`] frames; push
/// and pop are explicit bounds-checked length changes, and no frame
/// outlives the stack.
#[derive(Debug, Default)]
pub struct GroupStack {
    frames: Vec<Group>,
}

impl GroupStack {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(MAX_GROUP_DEPTH),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&Group> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Group> {
        self.frames.last_mut()
    }

    /// Preconditions for opening (or skipping) a group at this position:
    /// the stack is below capacity and the parent, if any, has no open
    /// test. Checked before the skip short-circuit as well, so a skipped
    /// group at an illegal position is still a usage error.
    pub fn ensure_can_open(&self) -> Result<(), UsageError> {
        if self.frames.len() >= MAX_GROUP_DEPTH {
            return Err(UsageError::DepthExceeded {
                max: MAX_GROUP_DEPTH,
            });
        }
        if self.top().is_some_and(|group| group.test.is_some()) {
            return Err(UsageError::TestStillOpen);
        }
        Ok(())
    }

    /// Push a fresh frame with zero counters and no open test.
    pub fn push(&mut self, name: &str) -> Result<(), UsageError> {
        self.ensure_can_open()?;
        self.frames.push(Group::new(name));
        Ok(())
    }

    /// Pop the top frame; its own test must be closed first.
    pub fn pop(&mut self) -> Result<Group, UsageError> {
        match self.top() {
            None => return Err(UsageError::NoOpenGroup),
            Some(group) if group.test.is_some() => return Err(UsageError::TestStillOpen),
            Some(_) => {}
        }
        self.frames.pop().ok_or(UsageError::NoOpenGroup)
    }

    /// Fully qualified name of a prospective child at the current
    /// position: all open frame names plus `name`, joined with `::`.
    pub fn qualified(&self, name: &str) -> String {
        let mut parts: Vec<&str> = self.frames.iter().map(|group| group.name.as_str()).collect();
        parts.push(name);
        parts.join("::")
    }

    /// Frames in cleanup resolution order: innermost first, outward to
    /// the root group.
    pub fn frames_innermost_first(&mut self) -> impl Iterator<Item = &mut Group> {
        self.frames.iter_mut().rev()
    }

    /// Drop the reserved frame storage at conclusion.
    pub fn release(&mut self) {
        self.frames = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::TestStatus;
    use std::time::Duration;

    /// Pushing past [`MAX_GROUP_DEPTH`] is rejected and leaves the stack
    /// at capacity with existing frames intact.
    #[test]
    fn push_rejects_depth_overflow() {
        let mut stack = GroupStack::new();
        for level in 0..MAX_GROUP_DEPTH {
            stack.push(&format!("level-{level}")).expect("push");
        }

        let err = stack.push("too-deep").expect_err("expected overflow");
        assert_eq!(err, UsageError::DepthExceeded { max: 4 });
        assert_eq!(stack.depth(), MAX_GROUP_DEPTH);
    }

    /// A group may not open while the parent has an open test.
    #[test]
    fn push_rejects_open_test_in_parent() {
        let mut stack = GroupStack::new();
        stack.push("parent").expect("push");
        stack
            .top_mut()
            .expect("top")
            .test
            .replace(ActiveTest::open("t", false, Duration::ZERO));

        let err = stack.push("child").expect_err("expected open-test error");
        assert_eq!(err, UsageError::TestStillOpen);
        assert_eq!(stack.depth(), 1);
    }

    /// Popping requires a frame and no open test in it.
    #[test]
    fn pop_guards_empty_stack_and_open_test() {
        let mut stack = GroupStack::new();
        assert_eq!(stack.pop().expect_err("empty"), UsageError::NoOpenGroup);

        stack.push("g").expect("push");
        stack
            .top_mut()
            .expect("top")
            .test
            .replace(ActiveTest::open("t", false, Duration::ZERO));
        assert_eq!(stack.pop().expect_err("open test"), UsageError::TestStillOpen);

        stack.top_mut().expect("top").test = None;
        let group = stack.pop().expect("pop");
        assert_eq!(group.name, "g");
        assert!(stack.is_empty());
    }

    /// Qualified names join all open frames with `::`.
    #[test]
    fn qualified_joins_frame_names() {
        let mut stack = GroupStack::new();
        assert_eq!(stack.qualified("root"), "root");

        stack.push("outer").expect("push");
        stack.push("inner").expect("push");
        assert_eq!(stack.qualified("leaf"), "outer::inner::leaf");
    }

    /// Frames iterate innermost first for cleanup resolution.
    #[test]
    fn frames_iterate_innermost_first() {
        let mut stack = GroupStack::new();
        stack.push("outer").expect("push");
        stack.push("inner").expect("push");
        stack.top_mut().expect("top").totals.record(TestStatus::Pass);

        let names: Vec<String> = stack
            .frames_innermost_first()
            .map(|group| group.name.clone())
            .collect();
        assert_eq!(names, vec!["inner".to_string(), "outer".to_string()]);
    }
}
