use neuro_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("use of undeclared variable '{name}' at {span}")]
    UndeclaredVariable { name: String, span: Span },

    #[error("update of undeclared variable '{name}' at {span}")]
    UndeclaredUpdate { name: String, span: Span },
}

impl SemanticError {
    /// The span to render a source snippet against.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndeclaredVariable { span, .. }
            | SemanticError::UndeclaredUpdate { span, .. } => *span,
        }
    }
}

pub type Result<T> = std::result::Result<T, SemanticError>;
