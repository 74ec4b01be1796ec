//! Cleanup Stack
//!
//! Pending scope-exit actions, innermost last. Entries are pushed when a
//! `defer` is lowered and popped when their scope finishes lowering; every
//! exit path in between (fallthrough, break, continue, return) emits the
//! entries it leaves behind, so each action runs exactly once per path.

use crate::ast::Expr;
use std::rc::Rc;

/// Lexical scope identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A position in the cleanup stack. Stays valid while the entries below it
/// are untouched; only the stack itself hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CleanupDepth(usize);

impl CleanupDepth {
    /// The empty stack
    pub const OUTERMOST: Self = Self(0);
}

#[derive(Debug, Clone)]
pub struct Cleanup {
    /// Scope that pushed this entry
    pub scope: ScopeId,
    /// Shared with the copies taken while unwinding
    pub action: Rc<Expr>,
}

#[derive(Debug, Default)]
pub struct CleanupStack {
    entries: Vec<Cleanup>,
}

impl CleanupStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: ScopeId, action: Expr) {
        self.entries.push(Cleanup {
            scope,
            action: Rc::new(action),
        });
    }

    pub fn depth(&self) -> CleanupDepth {
        CleanupDepth(self.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries pushed since `depth`, innermost first. Leaves the stack as is.
    pub fn actions_above(&self, depth: CleanupDepth) -> impl Iterator<Item = &Cleanup> {
        self.check(depth);
        self.entries[depth.0..].iter().rev()
    }

    /// Drop every entry above `depth`
    pub fn pop_to(&mut self, depth: CleanupDepth) {
        self.check(depth);
        self.entries.truncate(depth.0);
    }

    fn check(&self, depth: CleanupDepth) {
        assert!(
            depth.0 <= self.entries.len(),
            "stale cleanup depth {} (stack has {} entries)",
            depth.0,
            self.entries.len()
        );
    }
}
