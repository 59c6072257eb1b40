use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("stack underflow executing {instruction:?}")]
    StackUnderflow { instruction: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("jump to undefined label '{label}'")]
    UndefinedLabel { label: String },

    #[error("ordered comparison between differing value kinds")]
    MismatchedComparison,

    #[error("no input remaining for INPUT")]
    MissingInput,

    #[error("panic: {message}")]
    Panic { message: String },

    #[error("malformed bytecode instruction: {instruction:?}")]
    MalformedInstruction { instruction: String },

    #[error("unknown opcode {opcode:?} in instruction: {instruction:?}")]
    UnknownOpcode { opcode: String, instruction: String },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
