//! Control-Flow Graphs
//!
//! A `Cfg` holds the basic blocks of one function-like body. It is the only
//! allocator of blocks and registers, so block ids double as indices.

use super::block::{BasicBlock, BlockId};
use super::value::Register;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("Graph {0} has no blocks")]
    NoBlocks(String),

    #[error("Entry block {0} does not exist")]
    MissingEntry(BlockId),

    #[error("Block {0} is not terminated")]
    Unterminated(BlockId),

    #[error("Block {block} references non-existent successor {successor}")]
    MissingSuccessor { block: BlockId, successor: BlockId },

    #[error("Block {block} uses unallocated register {register}")]
    UnknownRegister { block: BlockId, register: Register },
}

#[derive(Debug, Clone, Serialize)]
pub struct Cfg {
    pub name: String,
    /// Basic blocks in creation order
    pub blocks: Vec<BasicBlock>,
    pub entry: BlockId,
    register_count: u32,
}

impl Cfg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            entry: BlockId(0),
            register_count: 0,
        }
    }

    /// Create and add a new empty block
    pub fn create_block(&mut self, label: Option<&str>) -> BlockId {
        let id = BlockId::new(self.blocks.len() as u32);
        let block = match label {
            Some(label) => BasicBlock::with_label(id, label),
            None => BasicBlock::new(id),
        };
        self.blocks.push(block);
        id
    }

    /// Allocate a fresh virtual register
    pub fn alloc_register(&mut self) -> Register {
        let reg = Register::new(self.register_count);
        self.register_count += 1;
        reg
    }

    pub fn register_count(&self) -> u32 {
        self.register_count
    }

    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(id.index())
    }

    /// Get a block that is known to exist
    ///
    /// Panics on an id this graph did not allocate.
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.index()]
    }

    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    /// Compute the total number of instructions across all blocks
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.len()).sum()
    }

    /// Find the first block carrying `label`
    pub fn block_by_label(&self, label: &str) -> Option<&BasicBlock> {
        self.blocks
            .iter()
            .find(|b| b.label.as_deref() == Some(label))
    }

    pub fn successors(&self, id: BlockId) -> Vec<BlockId> {
        self.get_block(id)
            .map(|b| b.successors())
            .unwrap_or_default()
    }

    /// Map from each block to the blocks that branch to it, in block order.
    /// A block with two edges to the same target is listed once.
    pub fn predecessor_map(&self) -> FxHashMap<BlockId, Vec<BlockId>> {
        let mut preds: FxHashMap<BlockId, Vec<BlockId>> = FxHashMap::default();
        for block in &self.blocks {
            for succ in block.successors() {
                let entry = preds.entry(succ).or_default();
                if !entry.contains(&block.id) {
                    entry.push(block.id);
                }
            }
        }
        preds
    }

    pub fn predecessors(&self, id: BlockId) -> Vec<BlockId> {
        self.predecessor_map().remove(&id).unwrap_or_default()
    }

    /// Blocks reachable from the entry, in depth-first preorder
    pub fn reachable_blocks(&self) -> Vec<BlockId> {
        let mut order = Vec::new();
        if self.entry().is_none() {
            return order;
        }

        let mut visited = FxHashSet::default();
        let mut worklist = vec![self.entry];
        while let Some(id) = worklist.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            // Push in reverse so the first successor is visited first
            for succ in self.successors(id).into_iter().rev() {
                if !visited.contains(&succ) {
                    worklist.push(succ);
                }
            }
        }
        order
    }

    /// Check the structural invariants the lowering pass guarantees: the entry
    /// exists, every block carries a terminator, every edge lands on an existing
    /// block and every register operand was allocated.
    pub fn verify(&self) -> Result<(), VerifyError> {
        if self.blocks.is_empty() {
            return Err(VerifyError::NoBlocks(self.name.clone()));
        }

        if self.entry().is_none() {
            return Err(VerifyError::MissingEntry(self.entry));
        }

        for block in &self.blocks {
            let Some(term) = &block.terminator else {
                return Err(VerifyError::Unterminated(block.id));
            };

            for succ in term.successors() {
                if self.get_block(succ).is_none() {
                    return Err(VerifyError::MissingSuccessor {
                        block: block.id,
                        successor: succ,
                    });
                }
            }

            let mut used: Vec<Register> = block
                .instructions
                .iter()
                .flat_map(|i| i.operands().into_iter().chain(std::iter::once(i.dest())))
                .collect();
            match term {
                super::Terminator::Branch { cond, .. } => used.push(*cond),
                super::Terminator::Return { value: Some(v) } => used.push(*v),
                _ => {}
            }
            if let Some(register) = used.into_iter().find(|r| r.as_u32() >= self.register_count) {
                return Err(VerifyError::UnknownRegister {
                    block: block.id,
                    register,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::block::Terminator;
    use crate::ir::instr::IrInstr;

    fn diamond() -> Cfg {
        let mut cfg = Cfg::new("diamond");
        let entry = cfg.create_block(Some("entry"));
        let left = cfg.create_block(None);
        let right = cfg.create_block(None);
        let merge = cfg.create_block(Some("merge"));
        let cond = cfg.alloc_register();
        cfg.block_mut(entry).add_instr(IrInstr::IntegerLiteral {
            dest: cond,
            value: 1,
        });
        cfg.block_mut(entry).set_terminator(Terminator::Branch {
            cond,
            then_block: left,
            else_block: right,
        });
        cfg.block_mut(left).set_terminator(Terminator::Jump { target: merge });
        cfg.block_mut(right).set_terminator(Terminator::Jump { target: merge });
        cfg.block_mut(merge).set_terminator(Terminator::Return { value: None });
        cfg
    }

    #[test]
    fn test_cfg_new() {
        let cfg = Cfg::new("test");
        assert_eq!(cfg.name, "test");
        assert!(cfg.is_empty());
        assert_eq!(cfg.register_count(), 0);
    }

    #[test]
    fn test_create_block_ids_are_dense() {
        let mut cfg = Cfg::new("test");
        assert_eq!(cfg.create_block(None), BlockId(0));
        assert_eq!(cfg.create_block(Some("b")), BlockId(1));
        assert_eq!(cfg.block_count(), 2);
        assert_eq!(cfg.block_by_label("b").map(|b| b.id), Some(BlockId(1)));
    }

    #[test]
    fn test_predecessors_and_reachability() {
        let cfg = diamond();
        assert_eq!(cfg.predecessors(BlockId(3)), vec![BlockId(1), BlockId(2)]);
        assert!(cfg.predecessors(BlockId(0)).is_empty());
        assert_eq!(
            cfg.reachable_blocks(),
            vec![BlockId(0), BlockId(1), BlockId(3), BlockId(2)]
        );
        assert_eq!(cfg.instruction_count(), 1);
    }

    #[test]
    fn test_verify_ok() {
        assert_eq!(diamond().verify(), Ok(()));
    }

    #[test]
    fn test_verify_empty() {
        let cfg = Cfg::new("test");
        assert_eq!(cfg.verify(), Err(VerifyError::NoBlocks("test".to_string())));
    }

    #[test]
    fn test_verify_unterminated() {
        let mut cfg = Cfg::new("test");
        cfg.create_block(None);
        assert_eq!(cfg.verify(), Err(VerifyError::Unterminated(BlockId(0))));
    }

    #[test]
    fn test_verify_missing_successor() {
        let mut cfg = Cfg::new("test");
        let entry = cfg.create_block(None);
        // Jump to non-existent block
        cfg.block_mut(entry)
            .set_terminator(Terminator::Jump { target: BlockId(999) });
        assert_eq!(
            cfg.verify(),
            Err(VerifyError::MissingSuccessor {
                block: BlockId(0),
                successor: BlockId(999),
            })
        );
    }

    #[test]
    fn test_verify_unknown_register() {
        let mut cfg = Cfg::new("test");
        let entry = cfg.create_block(None);
        cfg.block_mut(entry).set_terminator(Terminator::Return {
            value: Some(Register(3)),
        });
        assert!(matches!(
            cfg.verify(),
            Err(VerifyError::UnknownRegister { register: Register(3), .. })
        ));
    }
}
