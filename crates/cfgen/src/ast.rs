//! Input tree
//!
//! The statement and expression kinds the lowering pass understands. Trees are
//! produced upstream (parser and semantic analysis) and are assumed to be
//! well-formed; the serde representation lets other tools hand trees over as
//! JSON, tagged by `"kind"`.

use serde::{Deserialize, Serialize};

/// A compilation unit: a list of function-like bodies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub functions: Vec<Function>,
}

/// A named body lowered into its own graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub body: Stmt,
}

impl Function {
    pub fn new(name: impl Into<String>, body: Stmt) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /// `{ ... }`: a sequence of statements forming a lexical scope
    Brace { stmts: Vec<Stmt> },

    /// A lone `;`
    Semi,

    /// An expression evaluated for its effects
    Expr { expr: Expr },

    /// `dest = source`
    Assign { dest: Expr, source: Expr },

    /// `return` with an optional result
    Return { value: Option<Expr> },

    /// `if cond then_branch else else_branch`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `guard cond else else_branch`: the branch runs when `cond` is false
    Guard { cond: Expr, else_branch: Box<Stmt> },

    /// `while cond body`
    While { cond: Expr, body: Box<Stmt> },

    /// `do body while cond`
    DoWhile { body: Box<Stmt>, cond: Expr },

    /// C-style `for (init; cond; step) body`
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Box<Stmt>>,
        body: Box<Stmt>,
    },

    /// `for pattern in sequence body`
    ForEach {
        pattern: String,
        sequence: Expr,
        body: Box<Stmt>,
    },

    Break,

    Continue,

    /// Runs `action` whenever control leaves the enclosing scope
    Defer { action: Expr },
}

impl Stmt {
    pub fn brace(stmts: Vec<Stmt>) -> Self {
        Stmt::Brace { stmts }
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr { expr }
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::Return { value }
    }

    pub fn if_(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn guard(cond: Expr, else_branch: Stmt) -> Self {
        Stmt::Guard {
            cond,
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_(cond: Expr, body: Stmt) -> Self {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn do_while(body: Stmt, cond: Expr) -> Self {
        Stmt::DoWhile {
            body: Box::new(body),
            cond,
        }
    }

    pub fn defer(action: Expr) -> Self {
        Stmt::Defer { action }
    }

    /// Name of the statement kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Brace { .. } => "brace statement",
            Stmt::Semi => "semicolon",
            Stmt::Expr { .. } => "expression statement",
            Stmt::Assign { .. } => "assignment statement",
            Stmt::Return { .. } => "return statement",
            Stmt::If { .. } => "if statement",
            Stmt::Guard { .. } => "guard statement",
            Stmt::While { .. } => "while statement",
            Stmt::DoWhile { .. } => "do-while statement",
            Stmt::For { .. } => "for statement",
            Stmt::ForEach { .. } => "for-each statement",
            Stmt::Break => "break statement",
            Stmt::Continue => "continue statement",
            Stmt::Defer { .. } => "defer statement",
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// `callee(arg)`; multiple arguments arrive as a tuple
    Call { callee: Box<Expr>, arg: Box<Expr> },

    /// A reference to a named declaration
    DeclRef { name: String },

    IntegerLiteral { value: i64 },

    /// Implicit load of the value stored at an lvalue
    Load { sub: Box<Expr> },

    Paren { sub: Box<Expr> },

    /// Method application: binds `base` as the receiver of `callee`
    ThisApply { callee: Box<Expr>, base: Box<Expr> },

    Tuple { elements: Vec<Expr> },

    /// The metatype of a named type
    TypeOf { ty: String },

    FloatLiteral { value: f64 },

    StringLiteral { value: String },

    Closure { body: Box<Stmt> },
}

impl Expr {
    pub fn call(callee: Expr, arg: Expr) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arg: Box::new(arg),
        }
    }

    pub fn decl_ref(name: impl Into<String>) -> Self {
        Expr::DeclRef { name: name.into() }
    }

    pub fn int(value: i64) -> Self {
        Expr::IntegerLiteral { value }
    }

    pub fn load(sub: Expr) -> Self {
        Expr::Load { sub: Box::new(sub) }
    }

    pub fn paren(sub: Expr) -> Self {
        Expr::Paren { sub: Box::new(sub) }
    }

    pub fn this_apply(callee: Expr, base: Expr) -> Self {
        Expr::ThisApply {
            callee: Box::new(callee),
            base: Box::new(base),
        }
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::Tuple { elements }
    }

    pub fn type_of(ty: impl Into<String>) -> Self {
        Expr::TypeOf { ty: ty.into() }
    }

    /// Name of the expression kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Call { .. } => "call expression",
            Expr::DeclRef { .. } => "declaration reference",
            Expr::IntegerLiteral { .. } => "integer literal",
            Expr::Load { .. } => "load expression",
            Expr::Paren { .. } => "parenthesized expression",
            Expr::ThisApply { .. } => "method application",
            Expr::Tuple { .. } => "tuple expression",
            Expr::TypeOf { .. } => "typeof expression",
            Expr::FloatLiteral { .. } => "float literal",
            Expr::StringLiteral { .. } => "string literal",
            Expr::Closure { .. } => "closure expression",
        }
    }
}
