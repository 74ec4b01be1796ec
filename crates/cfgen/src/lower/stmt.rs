//! Statement Lowering
//!
//! Converts AST statements into blocks and terminators.

use super::condition::{GUARD_LABELS, IF_LABELS, WHILE_LABELS};
use super::control_flow::JumpDest;
use super::Lowerer;
use crate::ast::{Expr, Stmt};
use crate::config::DeadCodePolicy;
use crate::error::{LowerError, LowerResult};
use tracing::debug;

impl<'a> Lowerer<'a> {
    /// Lower a statement. Requires an insertion point.
    pub(super) fn lower_stmt(&mut self, stmt: &Stmt) -> LowerResult<()> {
        match stmt {
            Stmt::Brace { stmts } => self.lower_brace(stmts),
            Stmt::Semi => Ok(()),
            Stmt::Expr { expr } => self.lower_expr(expr).map(|_| ()),
            Stmt::Return { value } => self.lower_return(value.as_ref()),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => self.lower_if(cond, then_branch, else_branch.as_deref()),
            Stmt::Guard { cond, else_branch } => self.lower_guard(cond, else_branch),
            Stmt::While { cond, body } => self.lower_while(cond, body),
            Stmt::DoWhile { body, cond } => self.lower_do_while(body, cond),
            Stmt::Break => self.lower_break(),
            Stmt::Continue => self.lower_continue(),
            Stmt::Defer { action } => {
                self.cleanups.push(self.current_scope, action.clone());
                Ok(())
            }
            Stmt::Assign { .. } | Stmt::For { .. } | Stmt::ForEach { .. } => {
                Err(LowerError::Unsupported { what: stmt.kind() })
            }
        }
    }

    fn lower_brace(&mut self, stmts: &[Stmt]) -> LowerResult<()> {
        self.lower_scope(|this| {
            for (i, stmt) in stmts.iter().enumerate() {
                if matches!(stmt, Stmt::Semi) {
                    continue;
                }
                if !this.builder.has_insertion_point() {
                    match this.options.dead_code {
                        DeadCodePolicy::Skip => {
                            debug!(
                                function = %this.builder.cfg().name,
                                skipped = stmts.len() - i,
                                "dropping unreachable statements"
                            );
                            break;
                        }
                        DeadCodePolicy::Lower => {
                            let block = this.builder.create_block("unreachable");
                            this.builder.set_insertion_point(block);
                        }
                        DeadCodePolicy::Reject => {
                            return Err(LowerError::UnreachableCode {
                                function: this.builder.cfg().name.clone(),
                            });
                        }
                    }
                }
                this.lower_stmt(stmt)?;
            }
            Ok(())
        })
    }

    fn lower_return(&mut self, value: Option<&Expr>) -> LowerResult<()> {
        let value = value.map(|expr| self.lower_expr(expr)).transpose()?;
        self.emit_return(value)
    }

    fn lower_if(
        &mut self,
        cond: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> LowerResult<()> {
        let mut cond = self.emit_condition(cond, else_branch.is_some(), false, &IF_LABELS)?;

        cond.enter_true(&mut self.builder);
        self.lower_scope(|this| this.lower_stmt(then_branch))?;
        cond.exit_true(&mut self.builder);

        if let Some(else_branch) = else_branch {
            cond.enter_false(&mut self.builder);
            self.lower_scope(|this| this.lower_stmt(else_branch))?;
            cond.exit_false(&mut self.builder);
        }

        cond.complete(&mut self.builder);
        Ok(())
    }

    fn lower_guard(&mut self, cond: &Expr, else_branch: &Stmt) -> LowerResult<()> {
        let mut cond = self.emit_condition(cond, false, true, &GUARD_LABELS)?;
        cond.enter_true(&mut self.builder);
        self.lower_scope(|this| this.lower_stmt(else_branch))?;
        cond.exit_true(&mut self.builder);
        cond.complete(&mut self.builder);
        Ok(())
    }

    fn lower_while(&mut self, cond: &Expr, body: &Stmt) -> LowerResult<()> {
        let test_block = self.builder.create_block("while.cond");
        self.builder.emit_block(test_block);

        let cond = self.emit_condition(cond, false, false, &WHILE_LABELS)?;
        let exit_block = cond.false_dest();
        debug!(test = %test_block, body = %cond.true_block(), exit = %exit_block, "lowering while loop");

        let depth = self.cleanups.depth();
        self.loops.push(
            JumpDest::new(exit_block, depth),
            JumpDest::new(test_block, depth),
        );
        cond.enter_true(&mut self.builder);
        let result = self.lower_scope(|this| this.lower_stmt(body));
        self.loops.pop();
        result?;

        // Back edge
        if self.builder.has_insertion_point() {
            self.builder.create_jump(test_block);
        }
        cond.complete(&mut self.builder);
        Ok(())
    }

    fn lower_do_while(&mut self, body: &Stmt, cond: &Expr) -> LowerResult<()> {
        let body_block = self.builder.create_block("do.body");
        let cond_block = self.builder.create_block("do.cond");
        let exit_block = self.builder.create_block("do.exit");
        debug!(body = %body_block, test = %cond_block, exit = %exit_block, "lowering do-while loop");

        self.builder.emit_block(body_block);
        let depth = self.cleanups.depth();
        self.loops.push(
            JumpDest::new(exit_block, depth),
            JumpDest::new(cond_block, depth),
        );
        let result = self.lower_scope(|this| this.lower_stmt(body));
        self.loops.pop();
        result?;

        self.builder.emit_block(cond_block);
        let value = self.lower_expr(cond)?;
        self.builder.create_branch(value, body_block, exit_block);
        self.builder.set_insertion_point(exit_block);
        Ok(())
    }

    fn lower_break(&mut self) -> LowerResult<()> {
        let dest = self.loops.break_dest().ok_or(LowerError::InvalidBreak)?;
        self.emit_branch(dest)
    }

    fn lower_continue(&mut self) -> LowerResult<()> {
        let dest = self
            .loops
            .continue_dest()
            .ok_or(LowerError::InvalidContinue)?;
        self.emit_branch(dest)
    }
}
