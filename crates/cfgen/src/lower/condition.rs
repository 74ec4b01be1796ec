//! Two-way conditional control flow
//!
//! `emit_condition` terminates the current block with a branch and hands back
//! a [`Condition`] that walks the caller through the arms. The merge block is
//! only created once some arm actually falls through to it.

use super::Lowerer;
use crate::ast::Expr;
use crate::error::LowerResult;
use crate::ir::{BlockId, CfgBuilder};
use tracing::trace;

/// Block labels for one kind of conditional
#[derive(Debug, Clone, Copy)]
pub(super) struct BranchLabels {
    pub on_true: &'static str,
    pub on_false: &'static str,
    pub cont: &'static str,
}

pub(super) const IF_LABELS: BranchLabels = BranchLabels {
    on_true: "if.then",
    on_false: "if.else",
    cont: "if.end",
};

pub(super) const GUARD_LABELS: BranchLabels = BranchLabels {
    on_true: "guard.else",
    on_false: "guard.false",
    cont: "guard.end",
};

pub(super) const WHILE_LABELS: BranchLabels = BranchLabels {
    on_true: "while.body",
    on_false: "while.false",
    cont: "while.exit",
};

#[derive(Debug)]
pub(super) struct Condition {
    true_block: BlockId,
    false_block: Option<BlockId>,
    /// Where the branch goes when the true block is not taken
    false_dest: BlockId,
    cont_block: Option<BlockId>,
    cont_label: &'static str,
}

impl Condition {
    pub fn true_block(&self) -> BlockId {
        self.true_block
    }

    /// The false block, or the continuation when there is no false code
    pub fn false_dest(&self) -> BlockId {
        self.false_dest
    }

    pub fn enter_true(&self, builder: &mut CfgBuilder) {
        builder.set_insertion_point(self.true_block);
    }

    pub fn exit_true(&mut self, builder: &mut CfgBuilder) {
        self.exit_arm(builder);
    }

    pub fn enter_false(&self, builder: &mut CfgBuilder) {
        let block = self
            .false_block
            .expect("condition emitted without false code");
        builder.set_insertion_point(block);
    }

    pub fn exit_false(&mut self, builder: &mut CfgBuilder) {
        self.exit_arm(builder);
    }

    fn exit_arm(&mut self, builder: &mut CfgBuilder) {
        if !builder.has_insertion_point() {
            return;
        }
        let label = self.cont_label;
        let cont = *self
            .cont_block
            .get_or_insert_with(|| builder.create_block(label));
        builder.create_jump(cont);
    }

    /// Continue after the conditional: at the merge block, or nowhere if
    /// every arm transferred control away
    pub fn complete(self, builder: &mut CfgBuilder) {
        match self.cont_block {
            Some(cont) => builder.set_insertion_point(cont),
            None => builder.clear_insertion_point(),
        }
    }
}

impl<'a> Lowerer<'a> {
    /// Lower `cond` and branch on it. With `invert`, the true block is taken
    /// when the value is false.
    pub(super) fn emit_condition(
        &mut self,
        cond: &Expr,
        has_false_code: bool,
        invert: bool,
        labels: &BranchLabels,
    ) -> LowerResult<Condition> {
        let value = self.lower_expr(cond)?;

        let true_block = self.builder.create_block(labels.on_true);
        let (false_block, cont_block, false_dest) = if has_false_code {
            let block = self.builder.create_block(labels.on_false);
            (Some(block), None, block)
        } else {
            let block = self.builder.create_block(labels.cont);
            (None, Some(block), block)
        };

        let (then_block, else_block) = if invert {
            (false_dest, true_block)
        } else {
            (true_block, false_dest)
        };
        trace!(cond = %value, %then_block, %else_block, "conditional branch");
        self.builder.create_branch(value, then_block, else_block);

        Ok(Condition {
            true_block,
            false_block,
            false_dest,
            cont_block,
            cont_label: labels.cont,
        })
    }
}
