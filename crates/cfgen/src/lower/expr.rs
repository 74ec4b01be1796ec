//! Expression Lowering
//!
//! Expressions are straight-line: each lowers into the current block and
//! yields the register holding its value.

use super::Lowerer;
use crate::ast::Expr;
use crate::error::{LowerError, LowerResult};
use crate::ir::Register;

impl<'a> Lowerer<'a> {
    /// Lower an expression
    pub(super) fn lower_expr(&mut self, expr: &Expr) -> LowerResult<Register> {
        match expr {
            Expr::Call { callee, arg } => {
                let callee = self.lower_expr(callee)?;
                let arg = self.lower_expr(arg)?;
                Ok(self.builder.create_apply(callee, arg))
            }
            Expr::DeclRef { name } => Ok(self.builder.create_decl_ref(name)),
            Expr::IntegerLiteral { value } => Ok(self.builder.create_integer_literal(*value)),
            Expr::Load { sub } => {
                let address = self.lower_expr(sub)?;
                Ok(self.builder.create_load(address))
            }
            // Parentheses only group
            Expr::Paren { sub } => self.lower_expr(sub),
            Expr::ThisApply { callee, base } => {
                let callee = self.lower_expr(callee)?;
                let base = self.lower_expr(base)?;
                Ok(self.builder.create_apply(callee, base))
            }
            Expr::Tuple { elements } => {
                let elements = elements
                    .iter()
                    .map(|element| self.lower_expr(element))
                    .collect::<LowerResult<Vec<_>>>()?;
                Ok(self.builder.create_tuple(elements))
            }
            Expr::TypeOf { ty } => Ok(self.builder.create_type_of(ty)),
            Expr::FloatLiteral { .. } | Expr::StringLiteral { .. } | Expr::Closure { .. } => {
                Err(LowerError::Unsupported { what: expr.kind() })
            }
        }
    }
}
