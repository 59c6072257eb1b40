use thiserror::Error;

/// Malformed TAC should be unreachable from a well-formed AST; these exist
/// to fail loudly rather than silently miscompile if that invariant is ever
/// violated (e.g. by a hand-edited `--emit tac` file fed back in).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    #[error("malformed TAC instruction: {line:?}")]
    MalformedInstruction { line: String },

    #[error("unknown TAC opcode {opcode:?} in instruction: {line:?}")]
    UnknownOpcode { opcode: String, line: String },
}

pub type Result<T> = std::result::Result<T, CodegenError>;
