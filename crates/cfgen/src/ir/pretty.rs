//! Pretty-printing for IR
//!
//! Provides human-readable output for debugging IR structures.

use super::block::BasicBlock;
use super::cfg::Cfg;
use super::module::IrModule;
use std::fmt;

/// Trait for pretty-printing IR constructs
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for IrModule {
    fn pretty_print(&self) -> String {
        self.to_string()
    }
}

impl PrettyPrint for Cfg {
    fn pretty_print(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IrModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", func)?;
        }
        Ok(())
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fn {} {{", self.name)?;
        for block in &self.blocks {
            write_block(f, block, 2)?;
        }
        writeln!(f, "}}")
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &BasicBlock, indent: usize) -> fmt::Result {
    let prefix = " ".repeat(indent);

    match &block.label {
        Some(label) => writeln!(f, "{}{}: ; {}", prefix, block.id, label)?,
        None => writeln!(f, "{}{}:", prefix, block.id)?,
    }

    for instr in &block.instructions {
        writeln!(f, "{}  {}", prefix, instr)?;
    }

    match &block.terminator {
        Some(term) => writeln!(f, "{}  {}", prefix, term),
        None => writeln!(f, "{}  <open>", prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrInstr, Terminator};

    #[test]
    fn test_pretty_print_cfg() {
        let mut cfg = Cfg::new("answer");
        let entry = cfg.create_block(Some("entry"));
        let reg = cfg.alloc_register();
        cfg.block_mut(entry).add_instr(IrInstr::IntegerLiteral {
            dest: reg,
            value: 42,
        });
        cfg.block_mut(entry)
            .set_terminator(Terminator::Return { value: Some(reg) });

        let output = cfg.pretty_print();
        assert_eq!(
            output,
            "fn answer {\n  bb0: ; entry\n    r0 = integer_literal 42\n    return r0\n}\n"
        );
    }

    #[test]
    fn test_pretty_print_open_block() {
        let mut cfg = Cfg::new("f");
        cfg.create_block(None);
        assert!(cfg.pretty_print().contains("<open>"));
    }

    #[test]
    fn test_pretty_print_module() {
        let mut module = IrModule::new();
        module.add_function(Cfg::new("a"));
        module.add_function(Cfg::new("b"));
        assert_eq!(module.pretty_print(), "fn a {\n}\n\nfn b {\n}\n");
    }
}
