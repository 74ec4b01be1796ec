//! Basic Blocks and Control Flow
//!
//! Basic blocks are sequences of instructions with a single entry point
//! and a single exit point (the terminator).

use super::instr::IrInstr;
use super::value::Register;
use serde::Serialize;

/// Basic block identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub u32);

impl BlockId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// A basic block: sequence of instructions with single entry and exit
#[derive(Debug, Clone, Serialize)]
pub struct BasicBlock {
    pub id: BlockId,
    /// Optional label for debugging
    pub label: Option<String>,
    /// Instructions in this block (excluding terminator)
    pub instructions: Vec<IrInstr>,
    /// `None` while the block is still open
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            label: None,
            instructions: Vec::new(),
            terminator: None,
        }
    }

    pub fn with_label(id: BlockId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: Some(label.into()),
            instructions: Vec::new(),
            terminator: None,
        }
    }

    /// Add an instruction to this block
    ///
    /// Panics if the block is already terminated.
    pub fn add_instr(&mut self, instr: IrInstr) {
        assert!(
            !self.is_terminated(),
            "appending to terminated block {}",
            self.id
        );
        self.instructions.push(instr);
    }

    /// Set the terminator for this block
    ///
    /// Panics if the block is already terminated.
    pub fn set_terminator(&mut self, term: Terminator) {
        assert!(
            !self.is_terminated(),
            "block {} terminated twice",
            self.id
        );
        self.terminator = Some(term);
    }

    pub fn successors(&self) -> Vec<BlockId> {
        self.terminator
            .as_ref()
            .map(Terminator::successors)
            .unwrap_or_default()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }

    /// Get the number of instructions (excluding terminator)
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Control flow terminator (ends a basic block)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Terminator {
    /// Unconditional jump to target block
    Jump { target: BlockId },

    /// Two-way branch on a boolean value
    Branch {
        cond: Register,
        then_block: BlockId,
        else_block: BlockId,
    },

    /// Return from the function; `None` is the void result
    Return { value: Option<Register> },
}

impl Terminator {
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Terminator::Jump { target } => vec![*target],
            Terminator::Branch {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            Terminator::Return { .. } => vec![],
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Terminator::Return { .. })
    }
}

impl std::fmt::Display for Terminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminator::Jump { target } => write!(f, "jump {}", target),
            Terminator::Branch {
                cond,
                then_block,
                else_block,
            } => write!(f, "branch {} ? {} : {}", cond, then_block, else_block),
            Terminator::Return { value: None } => write!(f, "return"),
            Terminator::Return { value: Some(reg) } => write!(f, "return {}", reg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_block_new() {
        let block = BasicBlock::new(BlockId(0));
        assert_eq!(block.id, BlockId(0));
        assert!(block.is_empty());
        assert!(!block.is_terminated());
        assert!(block.successors().is_empty());
    }

    #[test]
    fn test_basic_block_with_label() {
        let block = BasicBlock::with_label(BlockId(1), "entry");
        assert_eq!(block.label, Some("entry".to_string()));
    }

    #[test]
    fn test_terminator_successors() {
        let jump = Terminator::Jump { target: BlockId(1) };
        assert_eq!(jump.successors(), vec![BlockId(1)]);

        let branch = Terminator::Branch {
            cond: Register(0),
            then_block: BlockId(1),
            else_block: BlockId(2),
        };
        assert_eq!(branch.successors(), vec![BlockId(1), BlockId(2)]);

        let ret = Terminator::Return { value: None };
        assert!(ret.successors().is_empty());
        assert!(ret.is_return());
    }

    #[test]
    fn test_terminator_display() {
        let jump = Terminator::Jump { target: BlockId(1) };
        assert_eq!(format!("{}", jump), "jump bb1");

        let ret = Terminator::Return { value: None };
        assert_eq!(format!("{}", ret), "return");

        let ret_val = Terminator::Return {
            value: Some(Register(0)),
        };
        assert_eq!(format!("{}", ret_val), "return r0");
    }

    #[test]
    #[should_panic(expected = "terminated twice")]
    fn test_double_termination_panics() {
        let mut block = BasicBlock::new(BlockId(0));
        block.set_terminator(Terminator::Return { value: None });
        block.set_terminator(Terminator::Return { value: None });
    }

    #[test]
    #[should_panic(expected = "appending to terminated block")]
    fn test_append_after_terminator_panics() {
        let mut block = BasicBlock::new(BlockId(0));
        block.set_terminator(Terminator::Jump { target: BlockId(1) });
        block.add_instr(IrInstr::IntegerLiteral {
            dest: Register(0),
            value: 1,
        });
    }
}
