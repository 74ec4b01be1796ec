//! Block Builder
//!
//! Owns the graph while it is being built, plus the insertion point: the one
//! open block new instructions are appended to. "No insertion point" is an
//! explicit state, reached after every terminator, and means the code being
//! lowered is not reachable by falling through.

use super::block::{BasicBlock, BlockId, Terminator};
use super::cfg::Cfg;
use super::instr::IrInstr;
use super::value::Register;

#[derive(Debug)]
pub struct CfgBuilder {
    cfg: Cfg,
    insertion_point: Option<BlockId>,
}

impl CfgBuilder {
    /// Create a graph with an `entry` block and position the builder in it
    pub fn new(name: impl Into<String>) -> Self {
        let mut cfg = Cfg::new(name);
        let entry = cfg.create_block(Some("entry"));
        cfg.entry = entry;
        Self {
            cfg,
            insertion_point: Some(entry),
        }
    }

    pub fn create_block(&mut self, label: &str) -> BlockId {
        self.cfg.create_block(Some(label))
    }

    pub fn insertion_block(&self) -> Option<BlockId> {
        self.insertion_point
    }

    pub fn has_insertion_point(&self) -> bool {
        self.insertion_point.is_some()
    }

    /// Start appending to `block`, which must still be open
    pub fn set_insertion_point(&mut self, block: BlockId) {
        assert!(
            !self.cfg.block(block).is_terminated(),
            "cannot insert into terminated block {}",
            block
        );
        self.insertion_point = Some(block);
    }

    pub fn clear_insertion_point(&mut self) {
        self.insertion_point = None;
    }

    /// Fall into `block`: jump to it from the current block if there is one,
    /// then continue inserting there
    pub fn emit_block(&mut self, block: BlockId) {
        if self.has_insertion_point() {
            self.create_jump(block);
        }
        self.set_insertion_point(block);
    }

    fn current_block_mut(&mut self) -> &mut BasicBlock {
        let block = self
            .insertion_point
            .expect("instruction emitted without an insertion point");
        self.cfg.block_mut(block)
    }

    fn emit(&mut self, instr: IrInstr) -> Register {
        let dest = instr.dest();
        self.current_block_mut().add_instr(instr);
        dest
    }

    pub fn create_integer_literal(&mut self, value: i64) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::IntegerLiteral { dest, value })
    }

    pub fn create_decl_ref(&mut self, name: &str) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::DeclRef {
            dest,
            name: name.to_string(),
        })
    }

    pub fn create_load(&mut self, address: Register) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::Load { dest, address })
    }

    pub fn create_apply(&mut self, callee: Register, arg: Register) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::Apply { dest, callee, arg })
    }

    pub fn create_tuple(&mut self, elements: Vec<Register>) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::Tuple { dest, elements })
    }

    pub fn create_type_of(&mut self, ty: &str) -> Register {
        let dest = self.cfg.alloc_register();
        self.emit(IrInstr::TypeOf {
            dest,
            ty: ty.to_string(),
        })
    }

    fn terminate(&mut self, term: Terminator) {
        self.current_block_mut().set_terminator(term);
        self.insertion_point = None;
    }

    pub fn create_jump(&mut self, target: BlockId) {
        self.terminate(Terminator::Jump { target });
    }

    pub fn create_branch(&mut self, cond: Register, then_block: BlockId, else_block: BlockId) {
        self.terminate(Terminator::Branch {
            cond,
            then_block,
            else_block,
        });
    }

    pub fn create_return(&mut self, value: Option<Register>) {
        self.terminate(Terminator::Return { value });
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    /// Hand the graph over; any block still open stays open
    pub fn finish(self) -> Cfg {
        self.cfg
    }
}
