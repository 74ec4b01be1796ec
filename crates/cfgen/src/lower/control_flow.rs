//! Control Flow Lowering Utilities
//!
//! Jump destinations and the break/continue destination stacks of the
//! enclosing loops.

use super::cleanup::CleanupDepth;
use crate::ir::BlockId;

/// A non-local jump target together with the cleanup depth to unwind to
/// before jumping there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpDest {
    pub block: BlockId,
    pub depth: CleanupDepth,
}

impl JumpDest {
    pub fn new(block: BlockId, depth: CleanupDepth) -> Self {
        Self { block, depth }
    }
}

/// Break and continue destinations, one entry per enclosing loop
#[derive(Debug, Default)]
pub struct LoopStack {
    break_dests: Vec<JumpDest>,
    continue_dests: Vec<JumpDest>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a loop
    pub fn push(&mut self, break_dest: JumpDest, continue_dest: JumpDest) {
        self.break_dests.push(break_dest);
        self.continue_dests.push(continue_dest);
    }

    /// Leave the innermost loop
    pub fn pop(&mut self) {
        self.break_dests.pop();
        self.continue_dests.pop();
    }

    pub fn break_dest(&self) -> Option<JumpDest> {
        self.break_dests.last().copied()
    }

    pub fn continue_dest(&self) -> Option<JumpDest> {
        self.continue_dests.last().copied()
    }

    pub fn is_in_loop(&self) -> bool {
        !self.break_dests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_stack() {
        let mut stack = LoopStack::new();
        assert!(!stack.is_in_loop());
        assert_eq!(stack.break_dest(), None);

        let outer = CleanupDepth::OUTERMOST;
        stack.push(
            JumpDest::new(BlockId(1), outer),
            JumpDest::new(BlockId(2), outer),
        );
        assert!(stack.is_in_loop());
        assert_eq!(stack.break_dest().map(|d| d.block), Some(BlockId(1)));
        assert_eq!(stack.continue_dest().map(|d| d.block), Some(BlockId(2)));

        stack.push(
            JumpDest::new(BlockId(3), outer),
            JumpDest::new(BlockId(4), outer),
        );
        assert_eq!(stack.break_dest().map(|d| d.block), Some(BlockId(3)));

        stack.pop();
        assert_eq!(stack.continue_dest().map(|d| d.block), Some(BlockId(2)));
        stack.pop();
        assert!(!stack.is_in_loop());
    }
}
