//! cfgen - Tree to Control-Flow Graph Lowering
//!
//! This crate lowers a statement/expression tree into a graph of basic blocks
//! connected by explicit branch terminators:
//! - **AST**: the closed set of statement and expression kinds (`ast` module)
//! - **IR**: blocks, instructions, terminators and the block builder (`ir` module)
//! - **Lowering**: the tree walker, cleanup stack and jump destinations (`lower` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use cfgen::ast::{Expr, Function, Stmt};
//! use cfgen::{lower_function, LowerOptions, PrettyPrint};
//!
//! let body = Stmt::brace(vec![
//!     Stmt::defer(Expr::call(Expr::decl_ref("close"), Expr::tuple(vec![]))),
//!     Stmt::ret(Some(Expr::int(0))),
//! ]);
//! let cfg = lower_function(&Function::new("main", body), &LowerOptions::default())?;
//! println!("{}", cfg.pretty_print());
//! ```

#![warn(rust_2018_idioms)]

/// Input tree: statements and expressions
pub mod ast;

/// Lowering configuration
pub mod config;

/// Lowering errors
pub mod error;

/// Control-flow graph representation and the block builder
pub mod ir;

/// Tree to CFG lowering
pub mod lower;

pub use config::{ConfigError, DeadCodePolicy, LowerOptions};
pub use error::{LowerError, LowerResult};
pub use ir::{Cfg, IrModule, PrettyPrint};
pub use lower::{lower_function, lower_module, Lowerer};
