use neuro_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {found:?} at {span}")]
    UnexpectedChar { found: char, span: Span },

    #[error("unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },

    #[error("indentation at {span} does not match any enclosing block level")]
    InconsistentDedent { span: Span },
}

impl LexError {
    /// The span every variant carries, for a driver to render a source
    /// snippet against.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::InconsistentDedent { span } => *span,
        }
    }
}

pub type Result<T> = std::result::Result<T, LexError>;
