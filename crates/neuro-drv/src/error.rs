use std::path::PathBuf;
use thiserror::Error;

/// Aggregates every stage's error type into one, so the driver has a single
/// `Result` to thread from source read through VM execution. Each variant
/// wraps its stage's own error via `#[from]`, the way `faxt`'s `FaxtError`
/// wraps `std::io::Error`/`serde_json::Error` rather than re-deriving them.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] neuro_lex::LexError),

    #[error(transparent)]
    Parse(#[from] neuro_par::ParseError),

    #[error(transparent)]
    Semantic(#[from] neuro_sem::SemanticError),

    #[error(transparent)]
    Codegen(#[from] neuro_code::CodegenError),

    #[error(transparent)]
    Runtime(#[from] neuro_vm::RuntimeError),
}

impl DriverError {
    /// The span to render a source snippet against, when this error came
    /// from a stage that tracks source positions. Codegen and runtime errors
    /// operate on textual TAC/bytecode, not source text, so they have none.
    pub fn span(&self) -> Option<neuro_util::Span> {
        match self {
            DriverError::Io { .. } => None,
            DriverError::Lex(e) => Some(e.span()),
            DriverError::Parse(e) => Some(e.span()),
            DriverError::Semantic(e) => Some(e.span()),
            DriverError::Codegen(_) => None,
            DriverError::Runtime(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
