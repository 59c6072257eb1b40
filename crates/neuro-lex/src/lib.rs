//! Indentation-sensitive lexer: turns neuroscript source text into a flat
//! token stream with synthesized `INDENT`/`DEDENT`/`NEWLINE` markers, the way
//! Python's own tokenizer does for its block structure.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::{LexError, Result};
pub use lexer::Lexer;
pub use token::{Keyword, Op, Token, TokenKind};
