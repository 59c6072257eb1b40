//! The stack virtual machine: interprets a flat bytecode instruction list
//! against an ordered sequence of external input values, accumulating an
//! output buffer that is joined into a single string on completion.

mod error;
mod value;
mod vm;

pub use error::{Result, RuntimeError};
pub use value::Value;
pub use vm::execute;
