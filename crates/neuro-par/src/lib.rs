//! AST types and the recursive-descent parser that builds them from a
//! [`neuro_lex`] token stream.

pub mod ast;
mod error;
mod parser;

pub use ast::{Expr, Literal, PrintKind, Program, Stmt, VarSource};
pub use error::{ParseError, Result};
pub use parser::Parser;
