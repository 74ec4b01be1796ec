//! AST to CFG Lowering
//!
//! Walks a function body once and emits its control-flow graph. Scope-exit
//! actions are tracked on a cleanup stack and replayed on every path that
//! leaves their scope; loops publish break/continue destinations that carry
//! the cleanup depth to unwind to.

mod cleanup;
mod condition;
mod control_flow;
mod expr;
mod stmt;

use crate::ast::{Function, Module, Stmt};
use crate::config::LowerOptions;
use crate::error::LowerResult;
use crate::ir::{Cfg, CfgBuilder, IrModule, Register};
use cleanup::{CleanupDepth, CleanupStack, ScopeId};
use control_flow::{JumpDest, LoopStack};
use tracing::{debug, instrument, trace};

/// Lowers one function body
pub struct Lowerer<'a> {
    options: &'a LowerOptions,
    builder: CfgBuilder,
    cleanups: CleanupStack,
    loops: LoopStack,
    /// Depth returns unwind to
    function_depth: CleanupDepth,
    current_scope: ScopeId,
    next_scope: u32,
}

impl<'a> Lowerer<'a> {
    pub fn new(name: &str, options: &'a LowerOptions) -> Self {
        Self {
            options,
            builder: CfgBuilder::new(name),
            cleanups: CleanupStack::new(),
            loops: LoopStack::new(),
            function_depth: CleanupDepth::OUTERMOST,
            current_scope: ScopeId(0),
            next_scope: 1,
        }
    }

    /// Lower `body` as the function's outermost scope and finish the graph
    pub fn lower_body(mut self, body: &Stmt) -> LowerResult<Cfg> {
        self.lower_scope(|this| this.lower_stmt(body))?;
        self.finish()
    }

    fn finish(mut self) -> LowerResult<Cfg> {
        // Falling off the end of the body returns nothing
        if self.builder.has_insertion_point() {
            trace!("adding default return");
            self.builder.create_return(None);
        }
        debug_assert!(self.cleanups.is_empty());
        debug_assert!(!self.loops.is_in_loop());

        let cfg = self.builder.finish();
        if self.options.verify {
            cfg.verify()?;
        }
        debug!(
            blocks = cfg.block_count(),
            instructions = cfg.instruction_count(),
            "lowered function"
        );
        Ok(cfg)
    }

    /// Run `f` inside a fresh lexical scope. Cleanups pushed by `f` are
    /// emitted on fallthrough and popped either way.
    fn lower_scope<F>(&mut self, f: F) -> LowerResult<()>
    where
        F: FnOnce(&mut Self) -> LowerResult<()>,
    {
        let depth = self.cleanups.depth();
        let outer = self.current_scope;
        self.current_scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        trace!(scope = %self.current_scope, "enter scope");

        let mut result = f(self);
        if result.is_ok() && self.builder.has_insertion_point() {
            result = self.emit_cleanups(depth);
        }

        trace!(scope = %self.current_scope, "exit scope");
        self.cleanups.pop_to(depth);
        self.current_scope = outer;
        result
    }

    /// Emit every pending cleanup above `depth`, innermost first, into the
    /// current block. The entries stay on the stack.
    fn emit_cleanups(&mut self, depth: CleanupDepth) -> LowerResult<()> {
        let pending: Vec<_> = self.cleanups.actions_above(depth).cloned().collect();
        if !pending.is_empty() {
            trace!(count = pending.len(), "unwinding cleanups");
        }
        for cleanup in &pending {
            trace!(scope = %cleanup.scope, "running cleanup");
            self.lower_expr(&cleanup.action)?;
        }
        Ok(())
    }

    /// Leave for `dest`, running the cleanups of every scope exited on the way
    fn emit_branch(&mut self, dest: JumpDest) -> LowerResult<()> {
        self.emit_cleanups(dest.depth)?;
        self.builder.create_jump(dest.block);
        Ok(())
    }

    fn emit_return(&mut self, value: Option<Register>) -> LowerResult<()> {
        self.emit_cleanups(self.function_depth)?;
        self.builder.create_return(value);
        Ok(())
    }
}

/// Lower a single function body into its control-flow graph
#[instrument(skip_all, fields(function = %function.name))]
pub fn lower_function(function: &Function, options: &LowerOptions) -> LowerResult<Cfg> {
    Lowerer::new(&function.name, options).lower_body(&function.body)
}

/// Lower every function of a module. The first failure aborts and is
/// reported with the name of the function it occurred in.
pub fn lower_module(module: &Module, options: &LowerOptions) -> LowerResult<IrModule> {
    let mut ir = IrModule::new();
    for function in &module.functions {
        let cfg = lower_function(function, options).map_err(|e| e.in_function(&function.name))?;
        ir.add_function(cfg);
    }
    debug!(functions = ir.function_count(), "lowered module");
    Ok(ir)
}
