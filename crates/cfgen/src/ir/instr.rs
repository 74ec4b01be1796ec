//! IR Instructions
//!
//! Non-terminating instructions. None of them transfer control; branches
//! live in [`super::Terminator`].

use super::value::Register;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IrInstr {
    /// dest = <integer constant>
    IntegerLiteral { dest: Register, value: i64 },

    /// dest = address of the named declaration
    DeclRef { dest: Register, name: String },

    /// dest = *address
    Load { dest: Register, address: Register },

    /// dest = callee(arg). Method applications bind the receiver as `arg`.
    Apply {
        dest: Register,
        callee: Register,
        arg: Register,
    },

    /// dest = (elements...)
    Tuple {
        dest: Register,
        elements: Vec<Register>,
    },

    /// dest = metatype of `ty`
    TypeOf { dest: Register, ty: String },
}

impl IrInstr {
    /// The register this instruction defines
    pub fn dest(&self) -> Register {
        match self {
            IrInstr::IntegerLiteral { dest, .. }
            | IrInstr::DeclRef { dest, .. }
            | IrInstr::Load { dest, .. }
            | IrInstr::Apply { dest, .. }
            | IrInstr::Tuple { dest, .. }
            | IrInstr::TypeOf { dest, .. } => *dest,
        }
    }

    /// Registers read by this instruction
    pub fn operands(&self) -> Vec<Register> {
        match self {
            IrInstr::IntegerLiteral { .. } | IrInstr::DeclRef { .. } | IrInstr::TypeOf { .. } => {
                vec![]
            }
            IrInstr::Load { address, .. } => vec![*address],
            IrInstr::Apply { callee, arg, .. } => vec![*callee, *arg],
            IrInstr::Tuple { elements, .. } => elements.clone(),
        }
    }
}

impl std::fmt::Display for IrInstr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrInstr::IntegerLiteral { dest, value } => write!(f, "{} = integer_literal {}", dest, value),
            IrInstr::DeclRef { dest, name } => write!(f, "{} = decl_ref {}", dest, name),
            IrInstr::Load { dest, address } => write!(f, "{} = load {}", dest, address),
            IrInstr::Apply { dest, callee, arg } => write!(f, "{} = apply {}({})", dest, callee, arg),
            IrInstr::Tuple { dest, elements } => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "{} = tuple ({})", dest, elems.join(", "))
            }
            IrInstr::TypeOf { dest, ty } => write!(f, "{} = typeof {}", dest, ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instr_display() {
        let apply = IrInstr::Apply {
            dest: Register(2),
            callee: Register(0),
            arg: Register(1),
        };
        assert_eq!(apply.to_string(), "r2 = apply r0(r1)");

        let tuple = IrInstr::Tuple {
            dest: Register(3),
            elements: vec![Register(1), Register(2)],
        };
        assert_eq!(tuple.to_string(), "r3 = tuple (r1, r2)");
    }

    #[test]
    fn test_instr_dest_and_operands() {
        let load = IrInstr::Load {
            dest: Register(5),
            address: Register(4),
        };
        assert_eq!(load.dest(), Register(5));
        assert_eq!(load.operands(), vec![Register(4)]);

        let lit = IrInstr::IntegerLiteral {
            dest: Register(0),
            value: -3,
        };
        assert!(lit.operands().is_empty());
    }
}
