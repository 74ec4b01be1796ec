//! Control-flow graph IR
//!
//! The output of lowering: straight-line instructions grouped into basic
//! blocks, with all control flow expressed by block terminators.
//!
//! # Structure
//!
//! - `IrModule` - The graphs of all functions in a module
//! - `Cfg` - One function body: blocks, entry block, register allocation
//! - `BasicBlock` - A sequence of instructions ending in one terminator
//! - `IrInstr` - Control-flow-free instructions, each defining a register
//! - `CfgBuilder` - Appends to the graph through an explicit insertion point

pub mod block;
pub mod builder;
pub mod cfg;
pub mod instr;
pub mod module;
pub mod pretty;
pub mod value;

pub use block::{BasicBlock, BlockId, Terminator};
pub use builder::CfgBuilder;
pub use cfg::{Cfg, VerifyError};
pub use instr::IrInstr;
pub use module::IrModule;
pub use pretty::PrettyPrint;
pub use value::Register;
